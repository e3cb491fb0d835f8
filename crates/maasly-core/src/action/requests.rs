// ── Typed arguments for machine actions ──
//
// Each struct renders to the form fields the server expects. Unset or empty
// fields are left out of the form entirely.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use strum::{AsRefStr, Display};

pub type Form = Vec<(&'static str, String)>;

fn push_non_empty(form: &mut Form, name: &'static str, value: &str) {
    if !value.is_empty() {
        form.push((name, value.to_owned()));
    }
}

fn push_user_data(form: &mut Form, user_data: Option<&[u8]>) {
    if let Some(data) = user_data.filter(|d| !d.is_empty()) {
        form.push(("user_data", STANDARD.encode(data)));
    }
}

// ── Deploy ─────────────────────────────────────────────────────────

/// Arguments for deploying (starting) an allocated machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartArgs {
    /// Raw cloud-init user data. Sent base64-encoded.
    pub user_data: Option<Vec<u8>>,
    pub distro_series: String,
    /// Sent as `hwe_kernel`.
    pub kernel: String,
    pub comment: String,
}

impl StartArgs {
    pub fn form(&self) -> Form {
        let mut form = Form::new();
        push_user_data(&mut form, self.user_data.as_deref());
        push_non_empty(&mut form, "distro_series", &self.distro_series);
        push_non_empty(&mut form, "hwe_kernel", &self.kernel);
        push_non_empty(&mut form, "comment", &self.comment);
        form
    }
}

// ── Power ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerOnArgs {
    pub user_data: Option<Vec<u8>>,
    pub comment: String,
}

impl PowerOnArgs {
    pub fn form(&self) -> Form {
        let mut form = Form::new();
        push_user_data(&mut form, self.user_data.as_deref());
        push_non_empty(&mut form, "comment", &self.comment);
        form
    }
}

/// How the BMC should stop the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StopMode {
    Hard,
    Soft,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerOffArgs {
    /// Server default (hard) when unset.
    pub stop_mode: Option<StopMode>,
    pub comment: String,
}

impl PowerOffArgs {
    pub fn form(&self) -> Form {
        let mut form = Form::new();
        if let Some(mode) = self.stop_mode {
            form.push(("stop_mode", mode.to_string()));
        }
        push_non_empty(&mut form, "comment", &self.comment);
        form
    }
}

// ── Release ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseArgs {
    pub comment: String,
}

impl ReleaseArgs {
    pub fn form(&self) -> Form {
        let mut form = Form::new();
        push_non_empty(&mut form, "comment", &self.comment);
        form
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn start_form_has_one_entry_per_arg() {
        let args = StartArgs {
            user_data: Some(b"userdata".to_vec()),
            distro_series: "trusty".into(),
            kernel: "kernel".into(),
            comment: "a comment".into(),
        };
        assert_eq!(
            args.form(),
            vec![
                ("user_data", "dXNlcmRhdGE=".to_owned()),
                ("distro_series", "trusty".to_owned()),
                ("hwe_kernel", "kernel".to_owned()),
                ("comment", "a comment".to_owned()),
            ]
        );
    }

    #[test]
    fn user_data_is_encoded_once() {
        let args = StartArgs {
            user_data: Some(vec![0xff, 0x00, 0x7f]),
            ..StartArgs::default()
        };
        let form = args.form();
        let decoded = STANDARD.decode(&form[0].1).unwrap();
        assert_eq!(decoded, vec![0xff, 0x00, 0x7f]);
    }

    #[test]
    fn empty_args_send_nothing() {
        assert!(StartArgs::default().form().is_empty());
        let args = StartArgs {
            user_data: Some(Vec::new()),
            ..StartArgs::default()
        };
        assert!(args.form().is_empty());
        assert!(PowerOffArgs::default().form().is_empty());
        assert!(ReleaseArgs::default().form().is_empty());
    }

    #[test]
    fn stop_mode_is_lowercase() {
        let args = PowerOffArgs {
            stop_mode: Some(StopMode::Soft),
            comment: "maintenance".into(),
        };
        assert_eq!(
            args.form(),
            vec![
                ("stop_mode", "soft".to_owned()),
                ("comment", "maintenance".to_owned()),
            ]
        );
    }

    #[test]
    fn power_on_form() {
        let args = PowerOnArgs {
            user_data: Some(b"#cloud-config".to_vec()),
            comment: String::new(),
        };
        assert_eq!(
            args.form(),
            vec![("user_data", "I2Nsb3VkLWNvbmZpZw==".to_owned())]
        );
    }
}
