/// 用 JSON 字面量快速创建 ApiObject 的宏
///
/// # 示例
/// ```
/// use commerce::api_object;
///
/// let charge = api_object!({ "id": "123", "pricing": { "local": { "amount": "1.00" } } });
/// assert!(charge["pricing"].as_object().is_some());
///
/// let client = commerce::ClientRef::new(());
/// let bound = api_object!(client; { "id": "456" });
/// assert!(bound.client().is_some());
/// ```
#[macro_export]
macro_rules! api_object {
    ({ $($tt:tt)* }) => {
        $crate::object::ApiObject::from_value(None, $crate::serde_json::json!({ $($tt)* })).unwrap_or_default()
    };
    ($client:expr; { $($tt:tt)* }) => {
        $crate::object::ApiObject::from_value(Some($client), $crate::serde_json::json!({ $($tt)* })).unwrap_or_default()
    };
}

/// 从 ApiObject 中按路径读取字段, 任一层缺失返回 None
///
/// # 示例
/// ```
/// use commerce::{api_object, field_path};
///
/// let charge = api_object!({ "pricing": { "local": { "amount": "1.00" } } });
/// assert_eq!(field_path!(charge, "pricing", "local", "amount").and_then(|f| f.as_str()), Some("1.00"));
/// assert!(field_path!(charge, "pricing", "crypto").is_none());
/// ```
#[macro_export]
macro_rules! field_path {
    ($obj:expr, $first:expr $(, $rest:expr)*) => {{
        let found = $obj.get($first);
        $(
            let found = found.and_then(|f| f.as_object()).and_then(|o| o.get($rest));
        )*
        found
    }};
}
