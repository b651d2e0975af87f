//! Transient alert banners

use crate::view::{AlertTarget, View};
use auctionsphere_config::AlertConfig;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Visual severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Danger,
    Warning,
    Info,
}

impl Default for AlertKind {
    fn default() -> Self {
        AlertKind::Success
    }
}

impl std::str::FromStr for AlertKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(AlertKind::Success),
            "danger" => Ok(AlertKind::Danger),
            "warning" => Ok(AlertKind::Warning),
            "info" => Ok(AlertKind::Info),
            _ => Err(format!("Invalid alert type: {}", s)),
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Success => write!(f, "success"),
            AlertKind::Danger => write!(f, "danger"),
            AlertKind::Warning => write!(f, "warning"),
            AlertKind::Info => write!(f, "info"),
        }
    }
}

/// A banner waiting to dismiss itself
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub message: String,
    pub kind: AlertKind,
    /// `alert alert-<kind> fade-in`
    pub class_name: String,
    pub expires_at: DateTime<Utc>,
}

impl Alert {
    pub fn new(message: &str, kind: AlertKind, shown_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            message: message.to_string(),
            kind,
            class_name: format!("alert alert-{} fade-in", kind),
            expires_at: shown_at + lifetime,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Show an alert at the top of the page container (or the body if there is none).
///
/// Alerts stack newest-first and each one expires `dismiss_after_secs` after it was shown.
pub fn show_alert(view: &mut dyn View, config: &AlertConfig, message: &str, kind: AlertKind) -> Alert {
    show_alert_at(view, config, message, kind, Utc::now())
}

/// [`show_alert`] with an explicit clock reading
pub fn show_alert_at(
    view: &mut dyn View,
    config: &AlertConfig,
    message: &str,
    kind: AlertKind,
    now: DateTime<Utc>,
) -> Alert {
    let lifetime = Duration::seconds(config.dismiss_after_secs as i64);
    let alert = Alert::new(message, kind, now, lifetime);
    let target = if view.has_container(&config.container_class) {
        AlertTarget::Container
    } else {
        AlertTarget::Body
    };
    view.insert_alert(target, alert.clone());
    alert
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessView;

    #[test]
    fn test_alert_class_name() {
        let alert = Alert::new("Saved", AlertKind::default(), Utc::now(), Duration::seconds(5));
        assert_eq!(alert.class_name, "alert alert-success fade-in");
        let alert = Alert::new("Nope", AlertKind::Danger, Utc::now(), Duration::seconds(5));
        assert_eq!(alert.class_name, "alert alert-danger fade-in");
    }

    #[test]
    fn test_show_alert_targets_container() {
        let config = AlertConfig::default();
        let mut view = HeadlessView::new().with_container("container");
        show_alert(&mut view, &config, "Welcome", AlertKind::Success);

        assert_eq!(view.alerts(AlertTarget::Container).len(), 1);
        assert!(view.alerts(AlertTarget::Body).is_empty());
    }

    #[test]
    fn test_show_alert_falls_back_to_body() {
        let config = AlertConfig::default();
        let mut view = HeadlessView::new().with_container("wrapper");
        show_alert(&mut view, &config, "Welcome", AlertKind::Info);

        assert!(view.alerts(AlertTarget::Container).is_empty());
        assert_eq!(view.alerts(AlertTarget::Body)[0].message, "Welcome");
    }

    #[test]
    fn test_alerts_stack_newest_first() {
        let config = AlertConfig::default();
        let mut view = HeadlessView::new().with_container("container");
        show_alert(&mut view, &config, "first", AlertKind::Success);
        show_alert(&mut view, &config, "second", AlertKind::Warning);
        show_alert(&mut view, &config, "second", AlertKind::Warning);

        let messages: Vec<&str> = view
            .alerts(AlertTarget::Container)
            .iter()
            .map(|a| a.message.as_str())
            .collect();
        assert_eq!(messages, vec!["second", "second", "first"]);
    }

    #[test]
    fn test_alert_expires_after_delay() {
        let config = AlertConfig::default();
        let mut view = HeadlessView::new().with_container("container");
        let t0 = Utc::now();
        show_alert_at(&mut view, &config, "old", AlertKind::Success, t0);
        show_alert_at(&mut view, &config, "new", AlertKind::Success, t0 + Duration::seconds(3));

        assert_eq!(view.dismiss_expired(t0 + Duration::milliseconds(4999)), 0);
        assert_eq!(view.dismiss_expired(t0 + Duration::seconds(5)), 1);
        assert_eq!(view.alerts(AlertTarget::Container)[0].message, "new");
        assert_eq!(view.dismiss_expired(t0 + Duration::seconds(8)), 1);
        assert!(view.alerts(AlertTarget::Container).is_empty());
    }
}
