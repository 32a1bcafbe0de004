//! # Page layout for a note export
//!
//! [`layout_note`] places the title, the wrapped body and the decoded images on
//! A4 pages without touching any PDF machinery, so placement can be tested on
//! its own. Positions are millimetres measured from the top-left corner of the
//! page; the renderer flips them into PDF's bottom-up coordinates.
//!
//! Nothing is ever dropped for lack of room: text continues on a new page, an
//! image that does not fit below the previous content starts a new page, and
//! an image taller than a whole page is scaled down to the usable height.

use store::{ExportConfig, Note};

use crate::metrics::text_width_mm;

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;
/// Baseline-to-baseline distance as a multiple of the font size.
const LINE_SPACING: f32 = 1.15;

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutItem {
    Text {
        text: String,
        font_size: f32,
        heading: bool,
        x_mm: f32,
        /// Distance of the baseline from the top edge.
        baseline_mm: f32,
    },
    Image {
        /// Index into the decoded images handed to the renderer.
        slot: usize,
        x_mm: f32,
        top_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageLayout {
    pub items: Vec<LayoutItem>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PdfLayout {
    pub pages: Vec<PageLayout>,
}

impl PdfLayout {
    pub fn items(&self) -> impl Iterator<Item = &LayoutItem> {
        self.pages.iter().flat_map(|page| page.items.iter())
    }

    pub fn image_count(&self) -> usize {
        self.items()
            .filter(|item| matches!(item, LayoutItem::Image { .. }))
            .count()
    }

    pub fn text_lines(&self) -> Vec<&str> {
        self.items()
            .filter_map(|item| match item {
                LayoutItem::Text { text, .. } => Some(text.as_str()),
                LayoutItem::Image { .. } => None,
            })
            .collect()
    }
}

struct Cursor<'a> {
    config: &'a ExportConfig,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn new(config: &'a ExportConfig) -> Self {
        Self {
            config,
            pages: vec![PageLayout::default()],
            y: config.margin_mm,
        }
    }

    fn bottom(&self) -> f32 {
        self.config.page_height_mm - self.config.margin_mm
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, |page| page.items.is_empty())
    }

    fn ensure_room(&mut self, height: f32) {
        if self.y + height > self.bottom() && !self.page_is_empty() {
            self.pages.push(PageLayout::default());
            self.y = self.config.margin_mm;
        }
    }

    fn push(&mut self, item: LayoutItem) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    fn text_line(&mut self, text: String, font_size: f32, heading: bool) {
        let line_height = font_size * LINE_SPACING * PT_TO_MM;
        self.ensure_room(line_height);
        let baseline_mm = self.y + font_size * PT_TO_MM;
        self.push(LayoutItem::Text {
            text,
            font_size,
            heading,
            x_mm: self.config.margin_mm,
            baseline_mm,
        });
        self.y += line_height;
    }

    fn image(&mut self, slot: usize, pixels: (u32, u32)) {
        let (px_width, px_height) = pixels;
        let usable_width = self.config.page_width_mm - 2.0 * self.config.margin_mm;
        let usable_height = self.config.page_height_mm - 2.0 * self.config.margin_mm;

        let mut width_mm = self.config.image_width_mm.min(usable_width);
        let mut height_mm = width_mm * px_height as f32 / px_width.max(1) as f32;
        if height_mm > usable_height {
            width_mm *= usable_height / height_mm;
            height_mm = usable_height;
        }

        self.ensure_room(height_mm);
        self.push(LayoutItem::Image {
            slot,
            x_mm: self.config.margin_mm,
            top_mm: self.y,
            width_mm,
            height_mm,
        });
        self.y += height_mm + self.config.spacing_mm;
    }
}

/// Lay out `note` with the given decoded image sizes (width, height in pixels),
/// in the order the images should appear.
pub fn layout_note(note: &Note, image_sizes: &[(u32, u32)], config: &ExportConfig) -> PdfLayout {
    let mut cursor = Cursor::new(config);

    for line in wrap_text(&note.title, config.text_width_mm, config.title_font_size, true) {
        cursor.text_line(line, config.title_font_size, true);
    }
    cursor.y += config.spacing_mm;

    for line in wrap_text(&note.content, config.text_width_mm, config.body_font_size, false) {
        cursor.text_line(line, config.body_font_size, false);
    }

    if !image_sizes.is_empty() {
        cursor.y += config.spacing_mm;
    }
    for (slot, pixels) in image_sizes.iter().enumerate() {
        cursor.image(slot, *pixels);
    }

    PdfLayout {
        pages: cursor.pages,
    }
}

/// Greedy word wrap to `max_width_mm` at `font_size` points, measured with the
/// Helvetica advances of the regular or bold face.
///
/// Explicit line breaks are kept; a word wider than a whole line is broken
/// across lines.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size: f32, bold: bool) -> Vec<String> {
    let width = |s: &str| text_width_mm(s, font_size, bold);
    let space = width(" ");

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0.0;
        for word in paragraph.split_whitespace() {
            for piece in split_to_width(word, max_width_mm, &width) {
                let piece_width = width(&piece);
                if !line.is_empty() && line_width + space + piece_width > max_width_mm {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0.0;
                }
                if !line.is_empty() {
                    line.push(' ');
                    line_width += space;
                }
                line.push_str(&piece);
                line_width += piece_width;
            }
        }
        lines.push(line);
    }
    lines
}

/// Break `word` into pieces no wider than `max_width_mm`; a single glyph wider
/// than the line still gets a piece of its own.
fn split_to_width(word: &str, max_width_mm: f32, width: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if width(&piece) > max_width_mm && piece.chars().count() > 1 {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{NoteColor, NoteId};

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: NoteId::from("1"),
            title: title.to_string(),
            content: content.to_string(),
            color: NoteColor::Default,
            images: vec![],
        }
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let lines = wrap_text(&text, 180.0, 12.0, false);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| text_width_mm(line, 12.0, false) <= 180.0));
        assert_eq!(lines.join(" ").split_whitespace().count(), 100);
    }

    #[test]
    fn test_wrap_measures_wide_capitals() {
        let caps = "HELLO WORLD ".repeat(30);
        let lines = wrap_text(&caps, 180.0, 12.0, false);
        assert!(lines.iter().all(|line| text_width_mm(line, 12.0, false) <= 180.0));
        assert_eq!(lines.join(" ").split_whitespace().count(), 60);

        let ws = "W".repeat(300);
        let lines = wrap_text(&ws, 180.0, 12.0, false);
        // 'W' is 944/1000 em: 180 mm holds 45 of them at 12 pt.
        assert_eq!(lines[0].len(), 45);
        assert!(lines.iter().all(|line| text_width_mm(line, 12.0, false) <= 180.0));
        assert_eq!(lines.concat(), ws);
    }

    #[test]
    fn test_bold_title_wraps_earlier() {
        let title = "mmmm ".repeat(30);
        let regular = wrap_text(&title, 180.0, 20.0, false);
        let bold = wrap_text(&title, 180.0, 20.0, true);
        assert!(bold.len() >= regular.len());
        assert!(bold.iter().all(|line| text_width_mm(line, 20.0, true) <= 180.0));
    }

    #[test]
    fn test_wrap_keeps_line_breaks_and_splits_long_words() {
        let long = "x".repeat(200);
        let lines = wrap_text(&format!("first\n\n{long}"), 180.0, 12.0, false);

        assert_eq!(lines[0], "first");
        assert_eq!(lines[1], "");
        assert!(lines.len() >= 4);
        assert_eq!(lines[2..].concat(), long);
    }

    #[test]
    fn test_title_then_body_then_images() {
        let config = ExportConfig::default();
        let layout = layout_note(&note("Trip", "pack bags"), &[(400, 200), (400, 100)], &config);

        let items: Vec<_> = layout.items().collect();
        assert!(matches!(items[0], LayoutItem::Text { heading: true, text, .. } if text == "Trip"));
        assert!(matches!(items[1], LayoutItem::Text { heading: false, text, .. } if text == "pack bags"));
        let LayoutItem::Image { width_mm, height_mm, top_mm: first_top, .. } = items[2] else {
            panic!("expected image, got {:?}", items[2]);
        };
        assert_eq!(*width_mm, 180.0);
        assert_eq!(*height_mm, 90.0);
        let LayoutItem::Image { top_mm: second_top, .. } = items[3] else {
            panic!("expected image, got {:?}", items[3]);
        };
        assert!((second_top - (first_top + 90.0 + config.spacing_mm)).abs() < 1e-3);
    }

    #[test]
    fn test_images_overflow_onto_new_pages() {
        let config = ExportConfig::default();
        let layout = layout_note(&note("t", "c"), &[(100, 100), (100, 100), (100, 100)], &config);

        assert_eq!(layout.image_count(), 3);
        assert_eq!(layout.pages.len(), 3);
        for page in &layout.pages {
            for item in &page.items {
                if let LayoutItem::Image { top_mm, height_mm, .. } = item {
                    assert!(top_mm + height_mm <= config.page_height_mm - config.margin_mm + 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_tall_image_scaled_to_page() {
        let config = ExportConfig::default();
        let layout = layout_note(&note("t", "c"), &[(10, 1000)], &config);

        let image = layout
            .items()
            .find(|item| matches!(item, LayoutItem::Image { .. }))
            .unwrap();
        let LayoutItem::Image { width_mm, height_mm, .. } = image else {
            unreachable!()
        };
        assert!((height_mm - 277.0).abs() < 1e-3);
        assert!((width_mm - 2.77).abs() < 1e-3);
    }

    #[test]
    fn test_long_body_continues_on_next_page() {
        let config = ExportConfig::default();
        let body = (0..120).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let layout = layout_note(&note("t", &body), &[], &config);

        assert!(layout.pages.len() >= 2);
        assert_eq!(layout.text_lines().len(), 121);
        assert_eq!(layout.text_lines().last().copied(), Some("line 119"));
    }
}
