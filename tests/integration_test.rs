//! End-to-end state machine flows over the public library API

use std::cell::RefCell;
use std::rc::Rc;

use chapterhouse::auth::AuthError;
use chapterhouse::testing::{CredentialBuilder, TestFixtures};
use chapterhouse::{AuthRequest, AuthState, LoginRequest, Provider};

#[test]
fn local_login_flow_authenticates_and_broadcasts() {
    let mut controller = TestFixtures::controller();
    let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));
    {
        let seen = Rc::clone(&seen);
        controller.subscribe(move |identity| {
            seen.borrow_mut()
                .push(identity.map(|i| i.display_name.clone()));
        });
    }

    // Page load with empty storage: Anonymous, broadcast once.
    assert_eq!(controller.bootstrap(), AuthState::Anonymous);

    let state = controller
        .handle(AuthRequest::Login(LoginRequest::new("john_doe", "hunter22")))
        .unwrap();
    let identity = state.identity().unwrap();
    assert_eq!(identity.display_name, "john_doe");
    assert_eq!(identity.provider, Provider::Local);

    controller.handle(AuthRequest::Logout).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![None, Some("john_doe".to_string()), None]
    );
}

#[test]
fn duplicate_username_registration_is_rejected_with_state_unchanged() {
    let mut controller = TestFixtures::controller();

    // register {name: "Ada Lovelace", username: "ada", email: "ada@x.com", secret: "abcdef"}
    let identity = controller.register(&TestFixtures::registration()).unwrap();
    assert_eq!(identity.display_name, "Ada Lovelace");
    controller.logout();

    // Same username, different email: rejected, still Anonymous.
    let mut second = TestFixtures::registration();
    second.email = "ada.second@x.com".to_string();
    let err = controller.register(&second).unwrap_err();

    assert!(matches!(err, AuthError::Conflict(_)));
    assert!(err.to_string().contains("username"));
    assert_eq!(controller.state(), AuthState::Anonymous);
    assert_eq!(controller.directory().len(), 1);
}

#[test]
fn duplicate_email_registration_is_rejected() {
    let mut controller = TestFixtures::controller();
    controller.register(&TestFixtures::registration()).unwrap();
    controller.logout();

    let mut second = TestFixtures::registration();
    second.username = "ada2".to_string();
    let err = controller.register(&second).unwrap_err();

    assert!(matches!(err, AuthError::Conflict(_)));
    assert!(err.to_string().contains("email"));
}

#[test]
fn external_credential_flow_authenticates_as_external() {
    let mut controller = TestFixtures::controller();
    let token = CredentialBuilder::new()
        .name("Grace")
        .email("g@x.com")
        .build();

    let state = controller
        .handle(AuthRequest::ExternalCredential { credential: token })
        .unwrap();

    let identity = state.identity().unwrap();
    assert_eq!(identity.display_name, "Grace");
    assert_eq!(identity.email.as_deref(), Some("g@x.com"));
    assert_eq!(identity.provider, Provider::External);
}

#[test]
fn four_part_credential_is_rejected_with_state_unchanged() {
    let mut controller = TestFixtures::controller();

    let err = controller
        .handle(AuthRequest::ExternalCredential {
            credential: "not.a.valid.jwt.token".to_string(),
        })
        .unwrap_err();

    assert!(matches!(err, AuthError::Decode(_)));
    assert_eq!(controller.state(), AuthState::Anonymous);
}

#[test]
fn logout_is_safe_from_anonymous() {
    let mut controller = TestFixtures::controller();

    controller.handle(AuthRequest::Logout).unwrap();
    controller.handle(AuthRequest::Logout).unwrap();
    assert_eq!(controller.state(), AuthState::Anonymous);
}

#[test]
fn rejected_transitions_do_not_reach_listeners() {
    let mut controller = TestFixtures::controller();
    let notifications = Rc::new(RefCell::new(0_u32));
    {
        let notifications = Rc::clone(&notifications);
        controller.subscribe(move |_| *notifications.borrow_mut() += 1);
    }

    let _ = controller.login(&LoginRequest::new("", ""));
    let _ = controller.submit_credential("bad");
    let _ = controller.register(&{
        let mut request = TestFixtures::registration();
        request.secret = "abc".to_string();
        request
    });

    assert_eq!(*notifications.borrow(), 0);
}

#[test]
fn a_panicking_listener_does_not_break_the_login_flow() {
    let mut controller = TestFixtures::controller();
    let seen = Rc::new(RefCell::new(0_u32));

    controller.subscribe(|_| panic!("profile badge renderer blew up"));
    {
        let seen = Rc::clone(&seen);
        controller.subscribe(move |_| *seen.borrow_mut() += 1);
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(|_| {}));
    let result = controller.login(&LoginRequest::new("john_doe", "hunter22"));
    std::panic::set_hook(previous_hook);

    assert!(result.is_ok());
    assert_eq!(*seen.borrow(), 1);
}
