//! # Markup 模块
//!
//! 文本控件使用的标记语言片段构造。
//!
//! 支持的标签（逐字节固定）：
//!
//! ```text
//! [color=#RRGGBB]...[/color]
//! [b]...[/b]
//! [url=INDEX]TEXT[/url]
//! [ol]...[/ol]
//! ```
//!
//! 文本内容不做转义，由故事作者保证不包含标签语法。

use crate::color::Color;

/// 标签与正文之间的分隔符
pub const LABEL_SEPARATOR: &str = " - ";

/// 选项列表中每一项的前缀
pub const LIST_ITEM_PREFIX: &str = " - ";

/// `[color=#RRGGBB]{inner}[/color]`
pub fn colored(color: Color, inner: &str) -> String {
    format!("[color={}]{}[/color]", color.to_hex(), inner)
}

/// `[b]{inner}[/b]`
pub fn bold(inner: &str) -> String {
    format!("[b]{}[/b]", inner)
}

/// `[url={index}]{text}[/url]`
pub fn url(index: usize, text: &str) -> String {
    format!("[url={}]{}[/url]", index, text)
}

/// `[ol]{items}[/ol]`
pub fn ordered_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from("[ol]");
    for item in items {
        out.push_str(item.as_ref());
    }
    out.push_str("[/ol]");
    out
}

/// 说话者标签：`[color=..][b]TITLE[/b] - [/color]`
///
/// 标题统一转换为大写。
pub fn speaker_label(title: &str, color: Color) -> String {
    let mut inner = bold(&title.to_uppercase());
    inner.push_str(LABEL_SEPARATOR);
    colored(color, &inner)
}

/// 可点击的列表项：` - [color=..][url=i]text[/url][/color]\n`
pub fn list_item(index: usize, text: &str, color: Color) -> String {
    let mut out = String::from(LIST_ITEM_PREFIX);
    out.push_str(&colored(color, &url(index, text)));
    out.push('\n');
    out
}
