/// Layouted: 预设好的一些Layout快速方法
/// ResultE<T> = Result<T, Erx>;
/// ResultEX = ResultE<()>;
/// fn smp<T: ToString>(error: T) -> Erx
/// fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx
use crate::conf;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

lazy_static! {
    static ref APP_SHORT: String =
        conf::settings_object().read().map(|s| s.short.clone()).unwrap_or_else(|_| conf::DEFAULT_SHORT.to_string());
}

/// Zero
pub static LAYOUTED_C_ZERO: &'static str = "0000";

/// ResultE<T> = Result<T, Erx>;
pub type ResultE<T> = Result<T, Erx>;

/// ResultEX = ResultE<()>;
pub type ResultEX = ResultE<()>;

/// Layouted: Some predefined Layouted methods
pub struct Layouted;

pub fn describe_error(e: &dyn std::error::Error) -> String {
    let mut description = e.to_string();
    let mut current = e.source();
    while let Some(source) = current {
        description.push_str(&format!("\nCaused by: {}", source));
        current = source.source();
    }
    description
}

/// emp: error message processor - 将标准错误类型转换为Erx错误类型
/// - message 为 error.to_string()
/// - extra 中 "ORIGIN" 保存完整的错误链描述
pub fn emp<T: std::error::Error>(error: T) -> Erx {
    let extra = vec![(String::from(EXTRA_ORIGIN), describe_error(&error))];
    let message = error.to_string();
    Erx { code: Default::default(), message, extra }
}

/// smp: simple convert T: ToString to Erx
pub fn smp<T: ToString>(error: T) -> Erx {
    Erx { code: Default::default(), message: error.to_string(), extra: Vec::new() }
}

/// amp: return a function that convert T: ToString to Erx
/// 生成的错误消息格式为: "{additional} : {原始错误消息}"
pub fn amp<T: ToString>(additional: &str) -> impl Fn(T) -> Erx {
    let additional = additional.to_string();
    move |err: T| Erx { code: Default::default(), message: format!("{} : {}", additional, err.to_string()), extra: Vec::new() }
}

/// extra key holding the error an Erx was translated from
pub static EXTRA_ORIGIN: &'static str = "ORIGIN";

/// extra key holding the missing key / attribute name
pub static EXTRA_KEY: &'static str = "KEY";

/// Predefined Layouted Code with length 4
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum PreL4 {
    /// Object: 对象构造错误
    OBJT,
    /// Attribute: 属性访问错误
    ATTR,
    /// Keys: 键访问错误
    KEYS,
    /// Serialize: 序列化错误
    SERI,
    /// Config: 配置错误
    CONF,
    /// Missing: 缺失
    MISS,
    /// Json: JSON 编解码
    JSON,
    /// Type: 类型不匹配
    TYPE,
    /// Undefined: 未定义错误
    UNDF,
    ///
    OTHE,
}

impl PreL4 {
    pub fn four(&self) -> &'static str {
        match self {
            PreL4::OBJT => "OBJT",
            PreL4::ATTR => "ATTR",
            PreL4::KEYS => "KEYS",
            PreL4::SERI => "SERI",
            PreL4::CONF => "CONF",
            PreL4::MISS => "MISS",
            PreL4::JSON => "JSON",
            PreL4::TYPE => "TYPE",
            PreL4::UNDF => "UNDF",
            PreL4::OTHE => "OTHE",
        }
    }
}

impl From<PreL4> for String {
    fn from(value: PreL4) -> Self {
        value.four().to_string()
    }
}

impl Layouted {
    /// attribute: 属性访问错误
    pub fn attribute(category: PreL4, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::ATTR.four(), category.four(), detail)
    }

    /// keys: 键访问错误
    pub fn keys(category: PreL4, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::KEYS.four(), category.four(), detail)
    }

    /// serialize: 序列化错误
    pub fn serialize(category: PreL4, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::SERI.four(), category.four(), detail)
    }

    /// object: 对象构造错误
    pub fn object(category: PreL4, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::OBJT.four(), category.four(), detail)
    }

    /// config: 配置错误
    pub fn config(category: PreL4, detail: &str) -> LayoutedC {
        LayoutedC::new(PreL4::CONF.four(), category.four(), detail)
    }
}

/// Code code format
/// aaaa-xxxx-yyyy-zzzz
///
///    aaaa : 应用标示，建议4位长度
///    xxxx : 单词字母，建议4位长度，用于区分大类（功能域）
///    yyyy : 字母或者数字，建议4位长度，用于区分子类
///    zzzz : 字母或者数字，建议4位长度，具体错误
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LayoutedC {
    pub application: String,
    pub domain: String,
    pub category: String,
    pub detail: String,
}

impl LayoutedC {
    pub fn okay() -> LayoutedC {
        LayoutedC {
            application: APP_SHORT.clone(),
            domain: LAYOUTED_C_ZERO.into(),
            category: LAYOUTED_C_ZERO.into(),
            detail: LAYOUTED_C_ZERO.into(),
        }
    }

    pub fn new(domain: &str, category: &str, detail: &str) -> LayoutedC {
        LayoutedC { application: APP_SHORT.clone(), domain: domain.into(), category: category.into(), detail: detail.into() }
    }

    pub fn is_okc(&self) -> bool {
        self.domain.replace("0", "").is_empty() && self.category.replace("0", "").is_empty() && self.detail.replace("0", "").is_empty()
    }

    pub fn layout_string(&self) -> String {
        format!("{}-{}-{}-{}", self.application, self.domain, self.category, self.detail)
    }

    pub fn get_domain(&self) -> &str {
        &self.domain
    }

    pub fn get_category(&self) -> &str {
        &self.category
    }
}

impl Default for LayoutedC {
    fn default() -> Self {
        LayoutedC { application: APP_SHORT.clone(), domain: PreL4::UNDF.into(), category: PreL4::UNDF.into(), detail: PreL4::UNDF.into() }
    }
}

impl From<LayoutedC> for String {
    fn from(value: LayoutedC) -> Self {
        value.layout_string()
    }
}

impl From<String> for LayoutedC {
    fn from(value: String) -> Self {
        let mut c = LayoutedC::default();
        let parts: Vec<&str> = value.split("-").collect();
        if let Some(application) = parts.get(0) {
            c.application = application.to_string();
        }
        if let Some(domain) = parts.get(1) {
            c.domain = domain.to_string();
        }
        if let Some(category) = parts.get(2) {
            c.category = category.to_string();
        }
        if let Some(detail) = parts.get(3) {
            c.detail = detail.to_string();
        }
        c
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Erx {
    code: LayoutedC,
    message: String,
    extra: Vec<(String, String)>,
}

impl Erx {
    pub fn new(message: &str) -> Erx {
        Erx { code: Default::default(), message: message.to_string(), extra: Vec::new() }
    }

    /// a backing-store key that does not exist
    pub fn key_not_found(key: &str) -> Erx {
        let mut erx = Erx::new(key).with_code(Layouted::keys(PreL4::MISS, "0001"));
        erx.add_extra(EXTRA_KEY, key);
        erx
    }

    /// an attribute that does not exist
    pub fn attribute_not_found(name: &str) -> Erx {
        let mut erx = Erx::new(name).with_code(Layouted::attribute(PreL4::MISS, "0001"));
        erx.add_extra(EXTRA_KEY, name);
        erx
    }

    /// re-raise a missing key as a missing attribute, keeping message and extras
    pub fn into_attribute_not_found(self) -> Erx {
        let origin = self.description();
        let mut erx = Erx { code: Layouted::attribute(PreL4::MISS, "0001"), message: self.message, extra: self.extra };
        erx.add_extra(EXTRA_ORIGIN, &origin);
        erx
    }

    /// JSON encoding / decoding failure
    pub fn serialization<T: std::error::Error>(error: T) -> Erx {
        emp(error).with_code(Layouted::serialize(PreL4::JSON, "0001"))
    }

    /// decoded value is not a JSON object
    pub fn not_an_object(found: &str) -> Erx {
        let mut erx = Erx::new(&format!("expected a JSON object, found {}", found)).with_code(Layouted::object(PreL4::TYPE, "0001"));
        erx.add_extra("FOUND", found);
        erx
    }

    pub fn with_code(mut self, code: LayoutedC) -> Erx {
        self.code = code;
        self
    }

    pub fn code(&self) -> LayoutedC {
        self.code.clone()
    }

    pub fn is_domain(&self, domain: PreL4) -> bool {
        self.code.domain == domain.four()
    }

    pub fn is_attribute_not_found(&self) -> bool {
        self.is_domain(PreL4::ATTR) && self.code.category == PreL4::MISS.four()
    }

    pub fn is_key_not_found(&self) -> bool {
        self.is_domain(PreL4::KEYS) && self.code.category == PreL4::MISS.four()
    }

    pub fn is_serialization(&self) -> bool {
        self.is_domain(PreL4::SERI)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> String {
        let mut description = self.code.layout_string();
        description.push_str(" ");
        description.push_str(&self.message);
        if self.extra.is_empty() {
            return description;
        }

        description.push_str(" { ");

        self.extra.iter().for_each(|x| {
            description.push_str(&format!("{}={} ,", x.0, x.1));
        });

        description.remove(description.len() - 1);
        description.push_str(" }");

        description
    }

    /// get extra
    pub fn extra(&self) -> &Vec<(String, String)> {
        &self.extra
    }

    /// get extra value, if not exists, return None
    pub fn extra_val(&self, key: &str) -> Option<String> {
        self.extra.iter().find(|e| e.0.eq(key)).map(|e| e.1.clone())
    }

    /// add extra
    /// if key exists, replace value
    pub fn add_extra(&mut self, key: &str, value: &str) -> &mut Self {
        for (k, v) in self.extra.iter_mut() {
            if *k == key {
                *v = value.to_string();
                return self;
            }
        }

        self.extra.push((key.to_string(), value.to_string()));
        self
    }
}

impl Display for Erx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", serde_json::to_string(&self).unwrap_or_default())
    }
}

impl std::error::Error for Erx {}

impl Default for Erx {
    fn default() -> Self {
        Erx { code: Default::default(), message: Default::default(), extra: Default::default() }
    }
}

impl From<&str> for Erx {
    fn from(s: &str) -> Self {
        s.to_string().into()
    }
}

impl From<String> for Erx {
    fn from(str: String) -> Erx {
        if str.is_empty() {
            return Erx::default();
        }

        serde_json::from_str(&str).unwrap_or_else(|_| Erx::new(&str))
    }
}

impl From<serde_json::Error> for Erx {
    fn from(value: serde_json::Error) -> Self {
        Erx::serialization(value)
    }
}
