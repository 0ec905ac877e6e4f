use log::debug;
use reqwest::{Response, StatusCode};
use tap::TapFallible;

use crate::check::CheckReport;
use crate::client::Client;
use crate::payloads::{AuthRequest, AuthResponse, Credentials};
use crate::util::{random_email, random_password, random_token};

// sentinel the server must reject as a malformed address
const INVALID_EMAIL: &str = "invalid_email";

/// One request/assertion pair in the ordered scenario sequence.
pub struct Step {
    pub banner: Option<&'static str>,
    pub narration: &'static str,
    pub description: &'static str,
    pub request: AuthRequest,
    pub expected: StatusCode,
}

impl Step {
    fn new(
        narration: &'static str,
        description: &'static str,
        request: AuthRequest,
        expected: StatusCode,
    ) -> Self {
        Self {
            banner: None,
            narration,
            description,
            request,
            expected,
        }
    }

    fn with_banner(mut self, banner: &'static str) -> Self {
        self.banner = Some(banner);
        self
    }
}

/// The register phase. The first step signs up with the given pair; the
/// conflict step at the end reuses that email with a different password.
pub fn register_steps(credentials: &Credentials) -> Vec<Step> {
    vec![
        Step::new(
            "> Register with valid email and password",
            "Expected 200 status for valid register",
            AuthRequest::signup(credentials.email.clone(), credentials.password.clone()),
            StatusCode::OK,
        )
        .with_banner("Testing Positive Scenario - REGISTER"),
        Step::new(
            "> Register with empty email",
            "Expected 400 status for invalid register",
            AuthRequest::signup(String::new(), random_password()),
            StatusCode::BAD_REQUEST,
        )
        .with_banner("Testing Negative Scenario - REGISTER"),
        Step::new(
            "> Register with empty password",
            "Expected 400 status for invalid register",
            AuthRequest::signup(random_email(), String::new()),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with invalid email format",
            "Expected 400 status for invalid register",
            AuthRequest::signup(INVALID_EMAIL.to_string(), random_password()),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with empty password",
            "Expected 400 status for invalid register",
            AuthRequest::signup(random_email(), String::new()),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with short password (char < 8)",
            "Expected 400 status for invalid register",
            AuthRequest::signup(random_email(), random_token(6)),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with long password (char > 32)",
            "Expected 400 status for invalid register",
            AuthRequest::signup(random_email(), random_token(52)),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with long password (char > 32)",
            "Expected 400 status for invalid register",
            AuthRequest::signup(random_email(), random_token(52)),
            StatusCode::BAD_REQUEST,
        ),
        Step::new(
            "> Register with existed email",
            "Expected 409 status for invalid register",
            AuthRequest::signup(credentials.email.clone(), random_password()),
            StatusCode::CONFLICT,
        ),
    ]
}

/// The login phase. The positive case must present the exact pair the
/// register phase signed up with.
pub fn login_steps(credentials: &Credentials) -> Vec<Step> {
    vec![
        Step::new(
            "> Login with valid email and password",
            "Expected 200 status for valid login",
            AuthRequest::login(credentials.email.clone(), credentials.password.clone()),
            StatusCode::OK,
        )
        .with_banner("Testing Positive Scenario - LOGIN"),
        Step::new(
            "> Login with invalid email",
            "Expected 400 status for invalid email",
            AuthRequest::login(INVALID_EMAIL.to_string(), random_password()),
            StatusCode::BAD_REQUEST,
        )
        .with_banner("Testing Negative Scenario - LOGIN"),
        Step::new(
            "> Login with invalid password",
            "Expected 400 status for invalid password",
            AuthRequest::login(random_email(), String::new()),
            StatusCode::BAD_REQUEST,
        ),
    ]
}

/// Runs the register and login phases in order. Every step always runs; a
/// mismatch is only a failed check. A successful login leaves its session
/// token on the client.
pub async fn run(client: &mut Client, credentials: &Credentials) -> CheckReport {
    let mut report = CheckReport::default();

    println!("--------- START OF REGISTER SCENARIO ---------");
    for step in register_steps(credentials) {
        execute_step(client, &step, &mut report).await;
    }
    println!("--------- END OF REGISTER SCENARIO ---------");
    println!();

    println!("--------- START OF LOGIN SCENARIO ---------");
    let mut steps = login_steps(credentials).into_iter();
    if let Some(positive) = steps.next() {
        let response = execute_step(client, &positive, &mut report).await;
        if let Some(response) = response {
            if response.status() == StatusCode::OK {
                keep_session_token(client, response, &mut report).await;
            }
        }
    }
    for step in steps {
        execute_step(client, &step, &mut report).await;
    }
    println!("--------- END OF LOGIN SCENARIO ---------");
    println!();

    report
}

async fn execute_step(client: &Client, step: &Step, report: &mut CheckReport) -> Option<Response> {
    if let Some(banner) = step.banner {
        println!("{}", banner);
    }
    println!("{}", step.narration);

    let result = client
        .auth(&step.request)
        .await
        .tap_err(|e| debug!("auth request failed: {:?}", e));

    // a connection-level failure counts the same as a wrong status
    let (response, matches) = match result {
        Ok(response) => {
            let matches = response.status() == step.expected;
            (Some(response), matches)
        }
        Err(_) => (None, false),
    };
    report.record(step.description, matches);
    response
}

async fn keep_session_token(client: &mut Client, response: Response, report: &mut CheckReport) {
    match response
        .json::<AuthResponse>()
        .await
        .tap_err(|e| debug!("login response body did not parse: {:?}", e))
    {
        Ok(body) => {
            report.record("Expected token in login response", !body.token.is_empty());
            client.token = Some(body.token);
        }
        Err(_) => {
            report.record("Expected token in login response", false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_credentials() -> Credentials {
        Credentials {
            email: "abc123@example.com".to_string(),
            password: "secret99".to_string(),
        }
    }

    #[test]
    fn test_register_expectations_in_order() {
        let steps = register_steps(&fixed_credentials());
        let expected: Vec<StatusCode> = steps.iter().map(|s| s.expected).collect();
        assert_eq!(
            expected,
            vec![
                StatusCode::OK,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::BAD_REQUEST,
                StatusCode::CONFLICT,
            ]
        );
    }

    #[test]
    fn test_conflict_step_reuses_registered_email() {
        let credentials = fixed_credentials();
        let steps = register_steps(&credentials);

        let first = steps.first().unwrap();
        assert_eq!(first.request.email, credentials.email);
        assert_eq!(first.request.password, credentials.password);

        let conflict = steps.last().unwrap();
        assert_eq!(conflict.request.email, credentials.email);
        // a fresh password, so the 409 can only come from the email
        assert_ne!(conflict.request.password, credentials.password);
    }

    #[test]
    fn test_login_reuses_registered_pair() {
        let credentials = fixed_credentials();
        let steps = login_steps(&credentials);
        assert_eq!(steps.len(), 3);

        let positive = steps.first().unwrap();
        assert_eq!(positive.request.email, credentials.email);
        assert_eq!(positive.request.password, credentials.password);
        assert_eq!(positive.expected, StatusCode::OK);

        for negative in &steps[1..] {
            assert_eq!(negative.expected, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_expectations_agree_with_request_contract() {
        use validator::Validate;

        let credentials = fixed_credentials();
        let steps: Vec<Step> = register_steps(&credentials)
            .into_iter()
            .chain(login_steps(&credentials))
            .collect();

        // every 400 case must be invalid by the server's declared rules,
        // every 200/409 case valid
        for step in steps {
            assert_eq!(
                step.request.validate().is_ok(),
                step.expected != StatusCode::BAD_REQUEST,
                "{} ({})",
                step.narration,
                step.expected,
            );
        }
    }
}
