//! Forgiving readers for loosely typed client JSON.
//!
//! Clients send numbers as numbers or strings and booleans as booleans,
//! numbers or strings.  Each reader returns `None` when the value cannot be
//! coerced; callers skip that field and keep the prior value.

use serde_json::Value;

use gs_core::AgentId;

/// The first of `keys` present in `obj`, with the key that matched.
pub fn field<'a>(obj: &'a Value, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    let map = obj.as_object()?;
    keys.iter().find_map(|&k| map.get(k).map(|v| (k, v)))
}

pub fn as_f64(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Non-negative integer; fractional input is truncated.
pub fn as_u64(v: &Value) -> Option<u64> {
    if let Some(n) = v.as_u64() {
        return Some(n);
    }
    let f = as_f64(v)?;
    (f >= 0.0 && f <= u64::MAX as f64).then(|| f.trunc() as u64)
}

pub fn as_u32(v: &Value) -> Option<u32> {
    as_u64(v).and_then(|n| u32::try_from(n).ok())
}

pub fn as_i32(v: &Value) -> Option<i32> {
    if let Some(n) = v.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = as_f64(v)?.trunc();
    (f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then(|| f as i32)
}

pub fn as_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn as_string(v: &Value) -> Option<String> {
    v.as_str().map(str::to_owned)
}

/// `7`, `"7"` or `"agent_7"`.
pub fn as_agent_id(v: &Value) -> Option<AgentId> {
    if let Some(n) = as_u32(v) {
        return Some(AgentId(n));
    }
    let s = v.as_str()?.trim();
    let digits = s.strip_prefix(AgentId::label()).and_then(|r| r.strip_prefix('_')).unwrap_or(s);
    digits.parse::<u32>().ok().map(AgentId)
}
