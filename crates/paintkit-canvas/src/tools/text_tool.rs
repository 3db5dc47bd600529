use paintkit_core::Point;

use super::{Progress, ShapeTool, ToolContext, ToolKind};
use crate::text::{self, TextStamp};

/// Stamps the configured text at the press point; drags are ignored.
///
/// The press point is the left end of the baseline. Text is filled with
/// the fill colour and outlined in the border colour.
#[derive(Debug, Clone, Default)]
pub struct TextTool;

impl ShapeTool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_press(&mut self, ctx: &mut ToolContext<'_>, at: Point) -> Progress {
        let Some(content) = ctx.params.text.as_deref() else {
            return Progress::Continue;
        };
        let Some(font) = text::font_for(&ctx.params.font_family) else {
            return Progress::Continue;
        };

        let stamp = TextStamp {
            text: content,
            origin: at,
            size: ctx.params.font_size,
            fill: ctx.style.fill,
            outline: ctx.style.border,
        };
        if text::draw_text(ctx.canvas, font, &stamp) {
            Progress::Commit
        } else {
            Progress::Continue
        }
    }

    fn on_drag(&mut self, _ctx: &mut ToolContext<'_>, _at: Point) {}

    fn on_release(&mut self, _ctx: &mut ToolContext<'_>, _at: Point) -> Progress {
        Progress::Continue
    }
}
