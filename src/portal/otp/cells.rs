//! 6 个独立的验证码输入格

pub const OTP_LENGTH: usize = 6;

/// 每格一个数字，输入后自动前进，空格退格时自动后退
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpCells {
    cells: [Option<char>; OTP_LENGTH],
}

impl OtpCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在 `index` 格输入，返回下一个应获得焦点的格
    ///
    /// 只取输入的最后一个字符；非数字被忽略，空输入清空该格。
    pub fn input(&mut self, index: usize, value: &str) -> Option<usize> {
        if index >= OTP_LENGTH {
            return None;
        }
        let Some(ch) = value.chars().last() else {
            self.cells[index] = None;
            return Some(index);
        };
        if !ch.is_ascii_digit() {
            return Some(index);
        }
        self.cells[index] = Some(ch);
        if index + 1 < OTP_LENGTH {
            Some(index + 1)
        } else {
            Some(index)
        }
    }

    /// 退格：有内容时清空当前格，已为空时焦点移到前一格
    pub fn backspace(&mut self, index: usize) -> Option<usize> {
        if index >= OTP_LENGTH {
            return None;
        }
        if self.cells[index].is_some() {
            self.cells[index] = None;
            Some(index)
        } else if index > 0 {
            Some(index - 1)
        } else {
            Some(0)
        }
    }

    /// 粘贴一串数字，从第一格开始依次填入
    pub fn paste(&mut self, text: &str) -> Option<usize> {
        let digits: Vec<char> = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(OTP_LENGTH)
            .collect();
        if digits.is_empty() {
            return None;
        }
        self.clear();
        for (slot, digit) in self.cells.iter_mut().zip(digits.iter()) {
            *slot = Some(*digit);
        }
        Some(digits.len().min(OTP_LENGTH - 1))
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// 提交按钮仅在 6 格全部填写时可用
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// 6 位数字转为整数提交（前导 0 不保留）
    pub fn code(&self) -> Option<u32> {
        if !self.is_complete() {
            return None;
        }
        self.cells.iter().flatten().collect::<String>().parse().ok()
    }

    pub fn clear(&mut self) {
        self.cells = [None; OTP_LENGTH];
    }
}
