// ── Machine actions ──
//
// Posts `op=<action>` to a machine's resource URI and folds the returned
// representation back into the machine the caller already holds. A failed
// action leaves the machine untouched.

pub mod requests;

use serde_json::Value;
use tracing::{debug, warn};

use maasly_api::{Error, RawResponse, Transport};

use crate::model::Machine;
use crate::read::read_machine;
use crate::version::Version;

use self::requests::{PowerOffArgs, PowerOnArgs, ReleaseArgs, StartArgs};

/// Runs actions against machines through a [`Transport`], decoding results
/// for a fixed API version.
#[derive(Debug)]
pub struct ActionInvoker<T> {
    transport: T,
    version: Version,
}

impl<T: Transport> ActionInvoker<T> {
    pub fn new(transport: T, version: Version) -> Self {
        Self { transport, version }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Deploy an allocated machine (`op=deploy`).
    pub async fn start(&self, machine: &Machine, args: &StartArgs) -> Result<(), Error> {
        self.post(machine, "deploy", &args.form()).await
    }

    /// Same as [`start`](Self::start), under the server's name for it.
    pub async fn deploy(&self, machine: &Machine, args: &StartArgs) -> Result<(), Error> {
        self.start(machine, args).await
    }

    pub async fn power_on(&self, machine: &Machine, args: &PowerOnArgs) -> Result<(), Error> {
        self.post(machine, "power_on", &args.form()).await
    }

    pub async fn power_off(&self, machine: &Machine, args: &PowerOffArgs) -> Result<(), Error> {
        self.post(machine, "power_off", &args.form()).await
    }

    /// Return a machine to the pool (`op=release`).
    pub async fn release(&self, machine: &Machine, args: &ReleaseArgs) -> Result<(), Error> {
        self.post(machine, "release", &args.form()).await
    }

    /// Re-read the machine from its resource URI and merge the result.
    pub async fn refresh(&self, machine: &Machine) -> Result<(), Error> {
        debug!(system_id = machine.system_id(), "refreshing machine");
        let response = self.transport.get(machine.resource_uri()).await?;
        self.apply(machine, response)
    }

    async fn post(
        &self,
        machine: &Machine,
        op: &str,
        form: &[(&'static str, String)],
    ) -> Result<(), Error> {
        debug!(
            system_id = machine.system_id(),
            op,
            fields = form.len(),
            "invoking machine action"
        );
        let response = self
            .transport
            .post_form(machine.resource_uri(), op, form)
            .await?;
        self.apply(machine, response)
    }

    fn apply(&self, machine: &Machine, response: RawResponse) -> Result<(), Error> {
        let status = response.status;
        let body = response.into_success_body().inspect_err(|e| {
            warn!(system_id = machine.system_id(), %status, kind = %e.kind(), "machine action failed");
        })?;

        let source: Value = serde_json::from_str(&body)
            .map_err(|e| Error::deserialization(format!("machine response is not JSON: {e}")))?;
        let update = read_machine(&self.version, &source)?;
        machine.merge_from(update)
    }
}
