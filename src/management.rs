use log::debug;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tap::TapFallible;

use crate::check::CheckReport;
use crate::client::Client;
use crate::payloads::{Credentials, Department, DepartmentRequest, Employee, UserUpdateRequest};

const EMPLOYEE_IDENTITY: &str = "XX12345";
const IMAGE_URI: &str = "https://example.com/images/logo.png";

/// Authenticated smoke checks over the management API: profile update, then
/// a department and an employee are created, listed, updated, and deleted.
/// Requires a session token on the client; without one every request fails
/// its check. The department id returned by the create call addresses the
/// later steps, so the run ends early if none comes back.
pub async fn run(client: &Client, credentials: &Credentials, report: &mut CheckReport) {
    println!("--------- START OF MANAGEMENT SCENARIO ---------");

    println!("> Update user profile");
    let profile = UserUpdateRequest {
        email: credentials.email.clone(),
        name: "Test User".to_string(),
        user_image_uri: IMAGE_URI.to_string(),
        company_name: "Test Company".to_string(),
        company_image_uri: IMAGE_URI.to_string(),
    };
    let response = expect_status(
        client.update_user(&profile).await,
        StatusCode::OK,
        "Expected 200 status for user update",
        report,
    );
    if let Some(response) = response {
        let body = json_body::<UserUpdateRequest>(response).await;
        report.record(
            "Expected updated profile in response",
            body.is_some_and(|user| user.name == profile.name),
        );
    }

    println!("> Get all users");
    let response = expect_status(
        client.get_users().await,
        StatusCode::OK,
        "Expected 200 status for user list",
        report,
    );
    if let Some(response) = response {
        let users = json_body::<Vec<Value>>(response).await;
        report.record(
            "Expected at least one user in list",
            users.is_some_and(|users| !users.is_empty()),
        );
    }

    println!("> Create a new department");
    let department = DepartmentRequest {
        name: "IT Department".to_string(),
    };
    let response = expect_status(
        client.create_department(&department).await,
        StatusCode::CREATED,
        "Expected 201 status for department create",
        report,
    );
    let department_id = match response {
        Some(response) => json_body::<Department>(response)
            .await
            .and_then(|d| d.id())
            .filter(|id| !id.is_empty()),
        None => None,
    };
    if !report.record("Expected department id in response", department_id.is_some()) {
        println!("--------- END OF MANAGEMENT SCENARIO ---------");
        println!();
        return;
    }
    let department_id = department_id.unwrap_or_default();

    println!("> Get all departments");
    let response = expect_status(
        client.get_departments().await,
        StatusCode::OK,
        "Expected 200 status for department list",
        report,
    );
    if let Some(response) = response {
        let departments = json_body::<Vec<Department>>(response).await;
        report.record(
            "Expected at least one department in list",
            departments.is_some_and(|departments| !departments.is_empty()),
        );
    }

    println!("> Update a department");
    let renamed = DepartmentRequest {
        name: "Updated IT Department".to_string(),
    };
    let response = expect_status(
        client.update_department(&department_id, &renamed).await,
        StatusCode::OK,
        "Expected 200 status for department update",
        report,
    );
    if let Some(response) = response {
        let body = json_body::<Department>(response).await;
        report.record(
            "Expected updated department name in response",
            body.is_some_and(|d| d.name == renamed.name),
        );
    }

    println!("> Create a new employee");
    let employee = Employee {
        identity_number: EMPLOYEE_IDENTITY.to_string(),
        name: "Bob Smith".to_string(),
        gender: "male".to_string(),
        department_id: department_id.clone(),
        employee_image_uri: IMAGE_URI.to_string(),
    };
    let response = expect_status(
        client.create_employee(&employee).await,
        StatusCode::CREATED,
        "Expected 201 status for employee create",
        report,
    );
    if let Some(response) = response {
        let body = json_body::<Employee>(response).await;
        report.record(
            "Expected created employee in response",
            body.is_some_and(|e| e.identity_number == employee.identity_number),
        );
    }

    println!("> Get all employees");
    let response = expect_status(
        client.get_employees().await,
        StatusCode::OK,
        "Expected 200 status for employee list",
        report,
    );
    if let Some(response) = response {
        let employees = json_body::<Vec<Employee>>(response).await;
        report.record(
            "Expected at least one employee in list",
            employees.is_some_and(|employees| !employees.is_empty()),
        );
    }

    println!("> Update an employee");
    let updated = Employee {
        name: "Updated Bob Smith".to_string(),
        ..employee
    };
    let response = expect_status(
        client.update_employee(EMPLOYEE_IDENTITY, &updated).await,
        StatusCode::OK,
        "Expected 200 status for employee update",
        report,
    );
    if let Some(response) = response {
        let body = json_body::<Employee>(response).await;
        report.record(
            "Expected updated employee name in response",
            body.is_some_and(|e| e.name == updated.name),
        );
    }

    println!("> Delete an employee");
    expect_status(
        client.delete_employee(EMPLOYEE_IDENTITY).await,
        StatusCode::OK,
        "Expected 200 status for employee delete",
        report,
    );

    println!("> Delete a department");
    expect_status(
        client.delete_department(&department_id).await,
        StatusCode::OK,
        "Expected 200 status for department delete",
        report,
    );

    println!("--------- END OF MANAGEMENT SCENARIO ---------");
    println!();
}

fn expect_status(
    result: eyre::Result<Response>,
    expected: StatusCode,
    description: &str,
    report: &mut CheckReport,
) -> Option<Response> {
    let result = result.tap_err(|e| debug!("management request failed: {:?}", e));
    match result {
        Ok(response) => {
            let matches = response.status() == expected;
            report.record(description, matches);
            matches.then_some(response)
        }
        Err(_) => {
            report.record(description, false);
            None
        }
    }
}

async fn json_body<T: DeserializeOwned>(response: Response) -> Option<T> {
    response
        .json::<T>()
        .await
        .tap_err(|e| debug!("response body did not parse: {:?}", e))
        .ok()
}
