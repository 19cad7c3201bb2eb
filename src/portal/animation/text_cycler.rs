//! 标题文字轮播

use crate::portal::animation::AnimationHandle;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct TextCycler {
    phrases: Vec<String>,
    index: usize,
}

impl TextCycler {
    /// 没有任何文字时返回 None
    pub fn new<I, S>(phrases: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return None;
        }
        Some(Self { phrases, index: 0 })
    }

    pub fn current(&self) -> &str {
        &self.phrases[self.index]
    }

    /// 切换到下一条，末尾回到第一条
    pub fn advance(&mut self) -> &str {
        self.index = (self.index + 1) % self.phrases.len();
        self.current()
    }
}

/// 每隔 `period` 切换一次文字并回调
pub fn spawn_text_cycler<F>(mut cycler: TextCycler, period: Duration, mut on_change: F) -> AnimationHandle
where
    F: FnMut(&str) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // 首次 tick 立即返回，先显示当前文字
        interval.tick().await;
        on_change(cycler.current());
        loop {
            interval.tick().await;
            on_change(cycler.advance());
        }
    });
    AnimationHandle::new(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn cycles_and_wraps() {
        assert!(TextCycler::new(Vec::<String>::new()).is_none());
        let mut cycler = TextCycler::new(["Faster quotes", "Happier clients", "Less admin"]).unwrap();
        assert_eq!(cycler.current(), "Faster quotes");
        assert_eq!(cycler.advance(), "Happier clients");
        assert_eq!(cycler.advance(), "Less admin");
        assert_eq!(cycler.advance(), "Faster quotes");
    }

    #[tokio::test(start_paused = true)]
    async fn emits_on_each_period_until_dropped() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let cycler = TextCycler::new(["a", "b"]).unwrap();
        let handle = spawn_text_cycler(cycler, Duration::from_secs(2), move |text| {
            sink.lock().unwrap().push(text.to_string());
        });

        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(*seen.lock().unwrap(), vec!["a", "b", "a"]);

        drop(handle);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
