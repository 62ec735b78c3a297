//! JSON 取值辅助函数

use serde_json::Value;

/// 按 JavaScript 的真值规则判断 JSON 值
///
/// `null`、`false`、`0`、`NaN` 与空字符串为假，其余（包括空数组与空对象）为真。
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// 递归展开任意层嵌套数组，非数组值原样保留
pub fn flatten_deep(value: &Value) -> Vec<Value> {
    let mut out = Vec::new();
    push_flattened(value, &mut out);
    out
}

fn push_flattened(value: &Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                push_flattened(item, out);
            }
        }
        other => out.push(other.clone()),
    }
}
