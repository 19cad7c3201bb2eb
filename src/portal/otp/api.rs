//! 验证码 HTTP API

use crate::portal::client::{endpoints, PortalClient};
use crate::portal::error::PortalResult;
use crate::portal::types::{handle_http_response, MessageResponse};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct VerifyOtpRequest {
    pub otp: u32,
}

pub struct OtpApi {
    client: PortalClient,
}

impl OtpApi {
    pub fn new(client: PortalClient) -> Self {
        Self { client }
    }

    pub async fn verify_otp(&self, token: &str, otp: u32) -> PortalResult<MessageResponse> {
        info!("[OtpAPI] 📡 提交验证码");
        let response = self
            .client
            .authed_with(reqwest::Method::POST, endpoints::VERIFY_OTP, token)
            .json(&VerifyOtpRequest { otp })
            .send()
            .await?;
        handle_http_response(response, "验证码校验").await
    }

    pub async fn resend_otp(&self, token: &str) -> PortalResult<MessageResponse> {
        info!("[OtpAPI] 📡 请求重发验证码");
        let response = self
            .client
            .authed_with(reqwest::Method::GET, endpoints::RESEND_OTP, token)
            .send()
            .await?;
        handle_http_response(response, "重发验证码").await
    }
}
