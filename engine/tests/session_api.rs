//! Session controller used through the crate root exports

use engine::{LogoutReason, SessionController, SessionState};
use std::sync::{Arc, Mutex};

#[test]
fn test_session_state_from_crate_root() {
    let ended = Arc::new(Mutex::new(Vec::new()));
    let sink = ended.clone();
    let mut controller = SessionController::new(move |user: &str, reason: LogoutReason| {
        sink.lock().unwrap().push((user.to_string(), reason));
    });

    controller.start("locacao");
    assert_eq!(
        controller.state(),
        &SessionState::Active {
            user: "locacao".to_string()
        }
    );

    assert!(controller.expire());
    assert_eq!(controller.state(), &SessionState::LoggedOut);
    assert_eq!(
        *ended.lock().unwrap(),
        vec![("locacao".to_string(), LogoutReason::Expired)]
    );
}
