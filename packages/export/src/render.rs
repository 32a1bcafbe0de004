use image::DynamicImage;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfLayerReference,
};
use store::ExportConfig;
use tracing::warn;

use crate::error::ExportError;
use crate::layout::{LayoutItem, PdfLayout};
use crate::metrics::is_win_ansi;

const IMAGE_DPI: f32 = 300.0;
const LAYER_NAME: &str = "Layer 1";

/// Draw a finished layout into PDF bytes. `images` is indexed by each image
/// item's slot.
pub fn render_pdf(
    title: &str,
    layout: &PdfLayout,
    images: &[DynamicImage],
    config: &ExportConfig,
) -> Result<Vec<u8>, ExportError> {
    let page_width = Mm(config.page_width_mm);
    let page_height = Mm(config.page_height_mm);
    let (doc, first_page, first_layer) = PdfDocument::new(title, page_width, page_height, LAYER_NAME);

    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let heading_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let mut replaced = 0;
    for (number, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if number == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(page_width, page_height, LAYER_NAME)
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for item in &page.items {
            match item {
                LayoutItem::Text {
                    text,
                    font_size,
                    heading,
                    x_mm,
                    baseline_mm,
                } => {
                    let font = if *heading { &heading_font } else { &body_font };
                    let (drawable, missing) = to_win_ansi(text);
                    replaced += missing;
                    draw_text(&layer, &drawable, *font_size, *x_mm, config.page_height_mm - baseline_mm, font);
                }
                LayoutItem::Image {
                    slot,
                    x_mm,
                    top_mm,
                    width_mm,
                    height_mm,
                } => {
                    let Some(image) = images.get(*slot) else {
                        return Err(ExportError::Pdf(format!("no decoded image for slot {slot}")));
                    };
                    draw_image(
                        &layer,
                        image,
                        *x_mm,
                        config.page_height_mm - top_mm - height_mm,
                        *width_mm,
                        *height_mm,
                    );
                }
            }
        }
    }

    if replaced > 0 {
        warn!(replaced, "characters outside the built-in font replaced with '?'");
    }
    doc.save_to_bytes().map_err(pdf_error)
}

/// Replace characters Helvetica cannot draw with `?`, counting them.
pub(crate) fn to_win_ansi(text: &str) -> (String, usize) {
    let mut missing = 0;
    let drawable = text
        .chars()
        .map(|c| {
            if is_win_ansi(c) {
                c
            } else {
                missing += 1;
                '?'
            }
        })
        .collect();
    (drawable, missing)
}

fn draw_text(
    layer: &PdfLayerReference,
    text: &str,
    font_size: f32,
    x_mm: f32,
    y_mm: f32,
    font: &IndirectFontRef,
) {
    if text.is_empty() {
        return;
    }
    layer.use_text(text, font_size, Mm(x_mm), Mm(y_mm), font);
}

fn draw_image(
    layer: &PdfLayerReference,
    image: &DynamicImage,
    x_mm: f32,
    bottom_mm: f32,
    width_mm: f32,
    height_mm: f32,
) {
    // Flatten alpha; the embedded stream is plain RGB.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let natural_width = rgb.width() as f32 * 25.4 / IMAGE_DPI;
    let natural_height = rgb.height() as f32 * 25.4 / IMAGE_DPI;

    Image::from_dynamic_image(&rgb).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x_mm)),
            translate_y: Some(Mm(bottom_mm)),
            scale_x: Some(width_mm / natural_width),
            scale_y: Some(height_mm / natural_height),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}

fn pdf_error(e: impl std::fmt::Debug) -> ExportError {
    ExportError::Pdf(format!("{e:?}"))
}
