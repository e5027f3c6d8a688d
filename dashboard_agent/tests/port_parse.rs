//! Port flag parsing for dashboard_agent.

use dashboard_agent::config::{parse_args, CliAction};

fn port(args: &[&str]) -> CliAction {
    parse_args(args.iter().map(|s| s.to_string()))
}

#[test]
fn port_long_short_and_assign() {
    assert_eq!(port(&["agent", "--port", "9001"]), CliAction::Run(Some(9001)));
    assert_eq!(port(&["agent", "-p", "9002"]), CliAction::Run(Some(9002)));
    assert_eq!(port(&["agent", "--port=9003"]), CliAction::Run(Some(9003)));
    assert_eq!(port(&["agent"]), CliAction::Run(None));
}

#[test]
fn long_form_wins_and_garbage_is_ignored() {
    assert_eq!(
        port(&["agent", "-p", "9002", "--port", "9001"]),
        CliAction::Run(Some(9001))
    );
    assert_eq!(port(&["agent", "--port", "http"]), CliAction::Run(None));
    assert_eq!(port(&["agent", "--port", "70000"]), CliAction::Run(None));
}
