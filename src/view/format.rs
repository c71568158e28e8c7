//! 数值格式化
//!
//! 成交量、成交额按“万”“亿”缩写，数字显示规则与浏览器端保持一致

const YI: f64 = 100_000_000.0;
const WAN: f64 = 10_000.0;

/// 数字转字符串，规则同 JavaScript 的 `Number.prototype.toString`
///
/// 整数不带小数点，-0 显示为 0
pub fn js_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}", n)
    }
}

/// 保留固定位小数，规则同 JavaScript 的 `toFixed`
///
/// 二进制可精确表示的 5 结尾（如 1.125）向远离零的方向进位
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return js_number(value);
    }

    let exact = format!("{:.60}", value.abs());
    let is_tie = exact
        .split_once('.')
        .and_then(|(_, frac)| frac.get(digits..))
        .map(|rest| rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0'))
        .unwrap_or(false);

    if !is_tie {
        return format!("{:.*}", digits, value);
    }

    let factor = 10f64.powi(digits as i32);
    format!("{:.*}", digits, (value * factor).round() / factor)
}

fn format_magnitude(n: f64) -> String {
    if n == 0.0 || n.is_nan() {
        return "0".to_string();
    }
    if n >= YI {
        format!("{}亿", to_fixed(n / YI, 2))
    } else if n >= WAN {
        format!("{}万", to_fixed(n / WAN, 2))
    } else {
        js_number(n)
    }
}

/// 格式化成交量
pub fn format_volume(volume: f64) -> String {
    format_magnitude(volume)
}

/// 格式化成交额
pub fn format_amount(amount: f64) -> String {
    format_magnitude(amount)
}

/// 转义 HTML 文本中的特殊字符
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
