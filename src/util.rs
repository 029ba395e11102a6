use ratatui_core::buffer::Buffer;
use ratatui_core::layout::Rect;
use ratatui_core::style::Style;
use ratatui_core::text::Span;
use ratatui_core::widgets::Widget;
use std::mem;

/// Returns a new style with fg and bg swapped.
///
/// This is not the same as setting Style::reversed().
/// The latter sends special controls to the terminal,
/// the former just swaps.
pub(crate) fn revert_style(mut style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        mem::swap(&mut style.fg, &mut style.bg);
        style
    } else {
        style.black().on_white()
    }
}

/// Fallback for select style.
pub(crate) fn fallback_select_style(style: Style) -> Style {
    if style.fg.is_some() || style.bg.is_some() {
        style
    } else {
        style.underlined()
    }
}

/// Render a span with an extra style patched on top.
/// Returns the area actually used.
pub(crate) fn render_span(span: &Span<'_>, style: Style, area: Rect, buf: &mut Buffer) -> Rect {
    let width = (span.width() as u16).min(area.width);
    let used = Rect::new(area.x, area.y, width, area.height.min(1));
    if !used.is_empty() {
        span.clone().patch_style(style).render(used, buf);
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui_core::style::{Color, Modifier};

    #[test]
    fn test_revert_style() {
        let style = Style::new().fg(Color::Red).bg(Color::Blue);
        let reverted = revert_style(style);
        assert_eq!(reverted.fg, Some(Color::Blue));
        assert_eq!(reverted.bg, Some(Color::Red));

        let reverted = revert_style(Style::new());
        assert_eq!(reverted.fg, Some(Color::Black));
        assert_eq!(reverted.bg, Some(Color::White));
    }

    #[test]
    fn test_fallback_select_style() {
        let style = Style::new().fg(Color::Yellow);
        assert_eq!(fallback_select_style(style), style);
        assert!(
            fallback_select_style(Style::new())
                .add_modifier
                .contains(Modifier::UNDERLINED)
        );
    }

    #[test]
    fn test_render_span() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        let used = render_span(
            &Span::from("abcdef"),
            Style::new().add_modifier(Modifier::DIM),
            Rect::new(1, 0, 3, 2),
            &mut buf,
        );
        assert_eq!(used, Rect::new(1, 0, 3, 1));
        assert_eq!(buf[(1, 0)].symbol(), "a");
        assert_eq!(buf[(3, 0)].symbol(), "c");
        assert!(buf[(1, 0)].modifier.contains(Modifier::DIM));
        assert_eq!(buf[(1, 1)].symbol(), " ");
    }
}
