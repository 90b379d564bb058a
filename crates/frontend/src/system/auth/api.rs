use contracts::system::auth::{
    LoginRequest, LoginResponse, MessageResponse, SignupRequest, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::Deserialize;

use crate::shared::api_utils::api_base;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Server's own message for a failed call, or a status line if the body
/// carries none.
async fn error_message(response: Response, action: &str) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("{} failed: {}", action, status),
    }
}

/// Create an account
pub async fn signup(request: SignupRequest) -> Result<MessageResponse, String> {
    let response = Request::post(&format!("{}/api/system/auth/signup", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Signup").await);
    }

    response
        .json::<MessageResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Login with username and password
pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&format!("{}/api/system/auth/login", api_base()))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(error_message(response, "Login").await);
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Get current user info
pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&format!("{}/api/system/auth/me", api_base()))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Get current user failed: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
