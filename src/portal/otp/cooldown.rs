//! 重发验证码冷却计时

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

pub const RESEND_COOLDOWN_SECS: u32 = 30;

/// 每秒递减一次的倒计时，大于 0 时禁止重发
#[derive(Clone, Debug)]
pub struct ResendCooldown {
    remaining: Arc<AtomicU32>,
}

impl ResendCooldown {
    /// 页面创建时即开始 30 秒冷却
    pub fn new() -> Self {
        Self {
            remaining: Arc::new(AtomicU32::new(RESEND_COOLDOWN_SECS)),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.remaining() > 0
    }

    /// 递减一秒，到 0 为止
    pub fn tick(&self) -> u32 {
        let prev = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1))
            .unwrap_or(0);
        prev.saturating_sub(1)
    }

    pub fn restart(&self) {
        self.remaining.store(RESEND_COOLDOWN_SECS, Ordering::SeqCst);
        debug!("[OTP] ⏱️ 重发冷却重新开始: {} 秒", RESEND_COOLDOWN_SECS);
    }

    /// 启动每秒一次的递减任务，返回的句柄被丢弃时任务停止
    pub fn spawn_ticker(&self) -> CountdownHandle {
        let cooldown = self.clone();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // 第一次 tick 立即返回，跳过
            interval.tick().await;
            loop {
                interval.tick().await;
                cooldown.tick();
            }
        });
        CountdownHandle { task }
    }
}

impl Default for ResendCooldown {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CountdownHandle {
    task: JoinHandle<()>,
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
