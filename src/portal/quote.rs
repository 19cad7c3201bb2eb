//! 报价单表单
//!
//! 多标签页表单，客户信息从之前选中的项目预填。报价只在本地编辑。

use crate::portal::error::PortalResult;
use crate::portal::project::{Project, ProjectCache};
use chrono::{Days, Local, NaiveDate};
use tracing::{debug, info};

/// 报价默认有效期（天）
const QUOTE_VALIDITY_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteTab {
    #[default]
    Customer,
    Project,
    Items,
    Review,
}

impl QuoteTab {
    pub const ALL: [QuoteTab; 4] = [
        QuoteTab::Customer,
        QuoteTab::Project,
        QuoteTab::Items,
        QuoteTab::Review,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1).min(Self::ALL.len() - 1)]
    }

    pub fn prev(self) -> Self {
        Self::ALL[self.position().saturating_sub(1)]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// 金额以分为单位
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price_cents: i64,
}

impl LineItem {
    pub fn total_cents(&self) -> i64 {
        self.unit_price_cents * i64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteForm {
    pub active_tab: QuoteTab,
    pub project_id: Option<String>,
    pub project_title: String,
    pub customer: CustomerDetails,
    pub items: Vec<LineItem>,
    /// 税率（万分比），例如 825 表示 8.25%
    pub tax_rate_bps: u32,
    pub issued_on: NaiveDate,
    pub valid_until: NaiveDate,
    pub notes: String,
}

impl QuoteForm {
    pub fn new(issued_on: NaiveDate) -> Self {
        Self {
            active_tab: QuoteTab::default(),
            project_id: None,
            project_title: String::new(),
            customer: CustomerDetails::default(),
            items: Vec::new(),
            tax_rate_bps: 0,
            issued_on,
            valid_until: issued_on
                .checked_add_days(Days::new(QUOTE_VALIDITY_DAYS))
                .unwrap_or(issued_on),
            notes: String::new(),
        }
    }

    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// 用项目的公司和联系人信息填充客户页
    pub fn prefill_from(&mut self, project: &Project) {
        self.project_id = Some(project.id.clone());
        self.project_title = project.title.clone();
        self.customer = CustomerDetails {
            company_name: project.company_name.clone(),
            contact_name: project.contact.name.clone(),
            email: project.contact.email.clone(),
            phone: project.contact.phone.clone(),
            address: project.address.clone(),
        };
        debug!("[Quote] 已从项目 {} 预填客户信息", project.id);
    }

    /// 从当前项目缓存创建表单；没有缓存时返回空白表单
    pub async fn from_cache(cache: &ProjectCache) -> PortalResult<Self> {
        let mut form = Self::today();
        if let Some(project) = cache.current().await? {
            form.prefill_from(&project);
        } else {
            info!("[Quote] 没有已选项目，使用空白报价单");
        }
        Ok(form)
    }

    pub fn select_tab(&mut self, tab: QuoteTab) {
        self.active_tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.active_tab = self.active_tab.prev();
    }

    pub fn add_item(&mut self, item: LineItem) {
        self.items.push(item);
    }

    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    pub fn subtotal_cents(&self) -> i64 {
        self.items.iter().map(LineItem::total_cents).sum()
    }

    /// 四舍五入到分
    pub fn tax_cents(&self) -> i64 {
        (self.subtotal_cents() * i64::from(self.tax_rate_bps) + 5_000) / 10_000
    }

    pub fn total_cents(&self) -> i64 {
        self.subtotal_cents() + self.tax_cents()
    }

    /// 至少有公司名称和一项数量大于 0 的条目
    pub fn is_ready(&self) -> bool {
        !self.customer.company_name.trim().is_empty() && self.items.iter().any(|i| i.quantity > 0)
    }
}
