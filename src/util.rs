use rand::distr::Alphanumeric;
use rand::{rng, Rng};

use crate::payloads::Action;

const DOMAINS: [&str; 3] = ["example.com", "test.com", "demo.com"];

pub fn random_token(len: usize) -> String {
    rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn random_email() -> String {
    let username = random_token(6);
    let domain = DOMAINS[rng().random_range(0..DOMAINS.len())];
    format!("{}@{}", username, domain)
}

pub fn random_password() -> String {
    random_token(8)
}

pub fn random_action() -> Action {
    const ACTIONS: [Action; 2] = [Action::Login, Action::Signup];
    ACTIONS[rng().random_range(0..ACTIONS.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(1)]
    #[case(6)]
    #[case(8)]
    #[case(52)]
    fn test_random_token_length_and_charset(#[case] len: usize) {
        let token = random_token(len);
        assert_eq!(token.len(), len);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_email_shape() {
        for _ in 0..32 {
            let email = random_email();
            let (username, domain) = email.split_once('@').unwrap();
            assert_eq!(username.len(), 6);
            assert!(DOMAINS.contains(&domain));
        }
    }

    #[test]
    fn test_random_password_length() {
        assert_eq!(random_password().len(), 8);
    }

    #[test]
    fn test_random_action_is_login_or_signup() {
        for _ in 0..32 {
            let action = random_action();
            assert!(matches!(action, Action::Login | Action::Signup));
        }
    }
}
