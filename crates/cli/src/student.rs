use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RegisterStudentRequest {
    pub name: String,
    pub ra: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub ra: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

pub struct StudentClient {
    base_url: String,
    client: reqwest::Client,
}

impl StudentClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn register(&self, name: String, ra: String) -> Result<StudentResponse> {
        let url = format!("{}/students", self.base_url);
        let request = RegisterStudentRequest { name, ra };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to send register student request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = error_message(response).await;
            anyhow::bail!("Failed to register student ({}): {}", status, error_text);
        }

        let student: StudentResponse = response
            .json()
            .await
            .context("Failed to parse register student response")?;

        Ok(student)
    }

    pub async fn list(&self) -> Result<Vec<StudentResponse>> {
        let url = format!("{}/students", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to send list students request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = error_message(response).await;
            anyhow::bail!("Failed to list students ({}): {}", status, error_text);
        }

        let students: Vec<StudentResponse> = response
            .json()
            .await
            .context("Failed to parse list students response")?;

        Ok(students)
    }
}

/// Prefer the server's `{"error": ...}` message, falling back to the raw body
async fn error_message(response: reqwest::Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    }
}
