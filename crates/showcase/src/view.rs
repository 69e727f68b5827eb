use crate::catalog::StoreItem;
use crate::config::CarouselName;
use carousel::{Arrow, CarouselView, DirectionResolver, Step, TextDirection};

const DOT_ACTIVE: char = '●';
const DOT_IDLE: char = '○';
const STAR: char = '★';

struct ItemRenderer<'a> {
    item: &'a StoreItem,
}

impl ItemRenderer<'_> {
    fn render(&self) -> String {
        let mut out = self.item.title.clone();
        if let Some(rating) = self.item.rating {
            out.push(' ');
            out.extend(std::iter::repeat_n(STAR, usize::from(rating.min(5))));
        }
        if let Some(subtitle) = &self.item.subtitle {
            out.push_str(&format!(" ({subtitle})"));
        }
        out
    }
}

/// The arrow pointing forward in reading order gets the double chevron.
fn arrow_label(resolver: &DirectionResolver, arrow: Arrow) -> &'static str {
    let forward = resolver.arrow_for(Step::Next) == arrow;
    match (arrow, forward) {
        (Arrow::Left, false) => "‹",
        (Arrow::Left, true) => "«",
        (Arrow::Right, true) => "»",
        (Arrow::Right, false) => "›",
    }
}

/// One text line per frame: arrows, visible items in reading order, dots.
/// In RTL the first visible item sits at the right edge.
pub fn render(name: &CarouselName, view: &CarouselView<'_, StoreItem>) -> String {
    if view.is_empty() {
        return format!("[{name}] (no items)");
    }

    let mut cells: Vec<String> = view
        .window
        .iter()
        .map(|item| ItemRenderer { item }.render())
        .collect();
    if view.direction == TextDirection::Rtl {
        cells.reverse();
    }

    let resolver = DirectionResolver::new(view.direction);
    let dots: String = view
        .dots()
        .into_iter()
        .map(|active| if active { DOT_ACTIVE } else { DOT_IDLE })
        .collect();

    let mut line = format!(
        "[{name}] {} {} {} {dots}",
        arrow_label(&resolver, Arrow::Left),
        cells.join(" | "),
        arrow_label(&resolver, Arrow::Right),
    );
    if view.paused {
        line.push_str(" (paused)");
    }
    line
}
