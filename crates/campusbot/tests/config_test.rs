//! Environment-driven settings
//!
//! Config values are read once per process, so everything that depends on
//! the environment is checked from a single serialized test.

use campusbot::{MessagePolicy, PageSettings};
use serial_test::serial;

#[test]
#[serial]
fn test_settings_from_environment() {
    std::env::set_var("MESSAGE_MODE", "Echo");
    std::env::set_var("WEB_APP_URL", "  https://app.example.edu  ");
    std::env::set_var("ADMIN_PANEL_URL", "");

    assert_eq!(MessagePolicy::from_config(), MessagePolicy::Echo);
    assert_eq!(
        PageSettings::from_config(),
        PageSettings {
            web_app_url: Some("https://app.example.edu".to_string()),
            admin_panel_url: None,
        }
    );
}
