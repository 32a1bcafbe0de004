//! # PDF export for quick notes
//!
//! [`export_note`] turns one note into a single PDF document: the title, the
//! wrapped body, then up to [`ExportConfig::max_images`] of its images, each
//! scaled to the configured width and moved to a new page when it would not
//! fit. All image decodes run concurrently and are joined before layout, so
//! the document is never produced while an image is still loading.

mod decode;
mod error;
mod layout;
mod metrics;
mod render;

pub use decode::{ImageDecoder, PayloadDecoder};
pub use error::ExportError;
pub use layout::{layout_note, wrap_text, LayoutItem, PageLayout, PdfLayout};
pub use metrics::text_width_mm;
pub use render::render_pdf;

use futures::future::join_all;
use image::{DynamicImage, GenericImageView};
use store::{ExportConfig, Note};
use tracing::{info, warn};

/// A rendered document ready to be offered as a download.
#[derive(Clone, Debug)]
pub struct PdfExport {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub layout: PdfLayout,
    /// Images that could not be decoded and were left out.
    pub skipped: usize,
}

pub async fn export_note<D: ImageDecoder>(
    note: &Note,
    decoder: &D,
    config: &ExportConfig,
) -> Result<PdfExport, ExportError> {
    let wanted = note.images.iter().take(config.max_images);
    let results = join_all(wanted.map(|payload| decoder.decode(payload))).await;

    let mut images: Vec<DynamicImage> = Vec::with_capacity(results.len());
    let mut skipped = 0;
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(image) => images.push(image),
            Err(e) => {
                warn!(note = %note.id, index, error = %e, "skipping image in PDF export");
                skipped += 1;
            }
        }
    }

    let sizes: Vec<(u32, u32)> = images.iter().map(|image| image.dimensions()).collect();
    let layout = layout_note(note, &sizes, config);
    let bytes = render_pdf(&note.title, &layout, &images, config)?;

    info!(
        note = %note.id,
        pages = layout.pages.len(),
        images = images.len(),
        skipped,
        bytes = bytes.len(),
        "exported note to PDF"
    );

    Ok(PdfExport {
        file_name: pdf_file_name(&note.title),
        bytes,
        layout,
        skipped,
    })
}

/// `"<title>.pdf"`, with path separators and control characters replaced.
pub fn pdf_file_name(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    if stem.is_empty() {
        "note.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageOutputFormat, Rgb, RgbImage};
    use store::{ImagePayload, NoteColor, NoteId};

    use super::*;

    fn png(width: u32, height: u32) -> ImagePayload {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 80, 40])));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .unwrap();
        ImagePayload::from_bytes(&bytes, "image/png")
    }

    fn note_with(images: Vec<ImagePayload>) -> Note {
        Note {
            id: NoteId::from("1700000000000"),
            title: "Groceries".to_string(),
            content: "milk, eggs, bread and a rather long list of other things to pick up ".repeat(4),
            color: NoteColor::Green,
            images,
        }
    }

    /// Finishes later the earlier the image is in the note.
    struct StaggeredDecoder {
        total: usize,
    }

    impl ImageDecoder for StaggeredDecoder {
        async fn decode(&self, payload: &ImagePayload) -> Result<DynamicImage, ExportError> {
            let image = PayloadDecoder.decode(payload).await?;
            let rounds = self.total.saturating_sub(image.width() as usize / 10);
            for _ in 0..rounds * 3 {
                tokio::task::yield_now().await;
            }
            Ok(image)
        }
    }

    #[tokio::test]
    async fn test_exports_at_most_three_images() {
        let note = note_with(vec![png(40, 20), png(40, 20), png(40, 20), png(40, 20)]);
        let config = ExportConfig::default();

        let export = export_note(&note, &PayloadDecoder, &config).await.unwrap();

        assert!(export.bytes.starts_with(b"%PDF"));
        assert_eq!(export.file_name, "Groceries.pdf");
        assert_eq!(export.layout.image_count(), 3);
        assert_eq!(export.skipped, 0);
        let lines = export.layout.text_lines();
        assert_eq!(lines[0], "Groceries");
        assert!(lines.len() > 2);
    }

    #[tokio::test]
    async fn test_note_without_images() {
        let note = note_with(vec![]);

        let export = export_note(&note, &PayloadDecoder, &ExportConfig::default())
            .await
            .unwrap();

        assert!(export.bytes.starts_with(b"%PDF"));
        assert_eq!(export.layout.image_count(), 0);
        assert_eq!(export.layout.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_broken_image_is_skipped() {
        let broken = ImagePayload::from_data_url("data:image/png;base64,AAAA");
        let note = note_with(vec![png(40, 20), broken, png(40, 20)]);

        let export = export_note(&note, &PayloadDecoder, &ExportConfig::default())
            .await
            .unwrap();

        assert_eq!(export.layout.image_count(), 2);
        assert_eq!(export.skipped, 1);
        assert!(export.bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_images_keep_note_order_when_decodes_finish_out_of_order() {
        // Widths 10, 20, 30 give heights 180, 90, 60 at the default image width.
        let note = note_with(vec![png(10, 10), png(20, 10), png(30, 10)]);
        let decoder = StaggeredDecoder { total: 3 };

        let export = export_note(&note, &decoder, &ExportConfig::default())
            .await
            .unwrap();

        let heights: Vec<f32> = export
            .layout
            .items()
            .filter_map(|item| match item {
                LayoutItem::Image { height_mm, .. } => Some(*height_mm),
                LayoutItem::Text { .. } => None,
            })
            .collect();
        assert_eq!(heights, vec![180.0, 90.0, 60.0]);
    }

    #[tokio::test]
    async fn test_text_outside_builtin_font_still_exports() {
        let mut note = note_with(vec![]);
        note.title = "Şişli 日本".to_string();

        let export = export_note(&note, &PayloadDecoder, &ExportConfig::default())
            .await
            .unwrap();

        assert!(export.bytes.starts_with(b"%PDF"));
        assert_eq!(export.layout.text_lines()[0], "Şişli 日本");
        assert_eq!(export.file_name, "Şişli 日本.pdf");
    }

    #[test]
    fn test_file_name_is_sanitized() {
        assert_eq!(pdf_file_name("Trip plan"), "Trip plan.pdf");
        assert_eq!(pdf_file_name("a/b\\c"), "a_b_c.pdf");
        assert_eq!(pdf_file_name("   "), "note.pdf");
    }
}
