//! 装饰性动画
//!
//! 粒子背景和文字轮播，各自独立运行，与会话/应用状态无关。

pub mod particles;
pub mod text_cycler;

pub use particles::{spawn_particle_loop, Link, Particle, ParticleField};
pub use text_cycler::{spawn_text_cycler, TextCycler};

use tokio::task::JoinHandle;

/// 动画循环句柄，`cancel` 或被丢弃时停止
pub struct AnimationHandle {
    task: JoinHandle<()>,
}

impl AnimationHandle {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    pub fn cancel(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
