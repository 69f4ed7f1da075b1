// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Single-ticket PDF report.
//!
//! Pages are A4 and set in the standard Helvetica fonts, so no font data is
//! embedded. Layout positions are given in millimetres from the top-left
//! corner of the page.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary, xobject};
use serde::Serialize;
use tracing::warn;

use crate::detail::MISSING_VALUE;
use crate::error::ApiError;

const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

const TITLE: &str = "Ticket Report";
const TITLE_SIZE: f32 = 18.0;
/// Advance width of the title in Helvetica, in em.
const TITLE_WIDTH_EM: f32 = 5.946;
const TITLE_CENTER_X_MM: f32 = 105.0;
const TITLE_Y_MM: f32 = 20.0;
/// `#0096a2`
const TITLE_RGB: (u8, u8, u8) = (0x00, 0x96, 0xa2);

const FIELD_SIZE: f32 = 12.0;
const FIELD_GRAY: u8 = 40;
const LABEL_X_MM: f32 = 20.0;
const VALUE_X_MM: f32 = 70.0;
const FIRST_FIELD_Y_MM: f32 = 35.0;
const FIELD_STEP_MM: f32 = 8.0;

const PHOTO_HEADING: &str = "Attached Photo";
const PHOTO_HEADING_SIZE: f32 = 16.0;
const PHOTO_HEADING_POS_MM: (f32, f32) = (20.0, 20.0);
const PHOTO_POS_MM: (f32, f32) = (20.0, 30.0);
const PHOTO_SIZE_MM: (f32, f32) = (160.0, 120.0);
const PHOTO_UNREADABLE: &str = "The photo could not be read and was not embedded.";

/// One label and value line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportField {
    pub label: &'static str,
    pub value: Option<String>,
}

impl ReportField {
    #[must_use]
    pub const fn new(label: &'static str, value: Option<String>) -> Self {
        Self { label, value }
    }

    /// The value as printed, with `—` for a missing one.
    #[must_use]
    pub fn display_value(&self) -> &str {
        self.value
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(MISSING_VALUE)
    }
}

/// A ticket report ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReport {
    file_name: String,
    fields: Vec<ReportField>,
    photo: Option<Vec<u8>>,
}

impl TicketReport {
    #[must_use]
    pub fn new(ticket_name: &str, fields: Vec<ReportField>, photo: Option<Vec<u8>>) -> Self {
        let stem: &str = if ticket_name.trim().is_empty() {
            "ticket"
        } else {
            ticket_name
        };
        Self {
            file_name: format!("{stem}.pdf"),
            fields,
            photo,
        }
    }

    /// `<ticket name>.pdf`, or `ticket.pdf` for an unnamed ticket.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn fields(&self) -> &[ReportField] {
        &self.fields
    }

    #[must_use]
    pub const fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Renders the PDF bytes.
    ///
    /// A photo that cannot be decoded gets a note on its page instead.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be assembled.
    pub fn render(&self) -> Result<Vec<u8>, ApiError> {
        let mut doc: Document = self.build_document().map_err(render_error)?;
        let mut bytes: Vec<u8> = Vec::new();
        doc.save_to(&mut bytes).map_err(render_error)?;
        Ok(bytes)
    }

    fn build_document(&self) -> Result<Document, lopdf::Error> {
        let mut doc: Document = Document::with_version("1.4");
        let pages_id: ObjectId = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::new();

        let summary_id: ObjectId = add_page(&mut doc, pages_id, self.summary_page())?;
        kids.push(summary_id.into());

        if let Some(photo) = &self.photo {
            let mut operations: Vec<Operation> = Vec::new();
            text_line(
                &mut operations,
                "F1",
                PHOTO_HEADING_SIZE,
                PHOTO_HEADING_POS_MM,
                PHOTO_HEADING,
            );
            match xobject::image_from(photo.clone()) {
                Ok(image) => {
                    let page_id: ObjectId = add_page(&mut doc, pages_id, operations)?;
                    let (x_mm, y_mm) = PHOTO_POS_MM;
                    let (w_mm, h_mm) = PHOTO_SIZE_MM;
                    doc.insert_image(
                        page_id,
                        image,
                        (mm_to_pt(x_mm), page_y(y_mm + h_mm)),
                        (mm_to_pt(w_mm), mm_to_pt(h_mm)),
                    )?;
                    kids.push(page_id.into());
                }
                Err(e) => {
                    warn!(error = %e, "Ticket photo could not be embedded");
                    text_line(
                        &mut operations,
                        "F1",
                        FIELD_SIZE,
                        PHOTO_POS_MM,
                        PHOTO_UNREADABLE,
                    );
                    kids.push(add_page(&mut doc, pages_id, operations)?.into());
                }
            }
        }

        let count: i64 = if self.photo.is_some() { 2 } else { 1 };
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        Ok(doc)
    }

    fn summary_page(&self) -> Vec<Operation> {
        let mut operations: Vec<Operation> = Vec::new();

        let (r, g, b) = TITLE_RGB;
        operations.push(Operation::new(
            "rg",
            vec![channel(r).into(), channel(g).into(), channel(b).into()],
        ));
        let title_width_mm: f32 = pt_to_mm(TITLE_WIDTH_EM * TITLE_SIZE);
        text_line(
            &mut operations,
            "F1",
            TITLE_SIZE,
            (TITLE_CENTER_X_MM - title_width_mm / 2.0, TITLE_Y_MM),
            TITLE,
        );

        operations.push(Operation::new("g", vec![channel(FIELD_GRAY).into()]));
        let mut y_mm: f32 = FIRST_FIELD_Y_MM;
        for field in &self.fields {
            text_line(
                &mut operations,
                "F2",
                FIELD_SIZE,
                (LABEL_X_MM, y_mm),
                &format!("{}:", field.label),
            );
            text_line(
                &mut operations,
                "F1",
                FIELD_SIZE,
                (VALUE_X_MM, y_mm),
                field.display_value(),
            );
            y_mm += FIELD_STEP_MM;
        }

        operations
    }
}

fn render_error(e: impl std::fmt::Display) -> ApiError {
    ApiError::Internal {
        message: format!("Could not render ticket report: {e}"),
    }
}

fn channel(value: u8) -> f32 {
    f32::from(value) / 255.0
}

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

fn pt_to_mm(pt: f32) -> f32 {
    pt * 25.4 / 72.0
}

/// Converts a distance from the top edge into a PDF y coordinate.
fn page_y(mm_from_top: f32) -> f32 {
    PAGE_HEIGHT_PT - mm_to_pt(mm_from_top)
}

fn font(base: &str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Adds an A4 page drawing `operations` under the page tree `pages_id`.
fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    operations: Vec<Operation>,
) -> Result<ObjectId, lopdf::Error> {
    let content: Vec<u8> = Content { operations }.encode()?;
    let content_id: ObjectId = doc.add_object(Stream::new(Dictionary::new(), content));
    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
        "Resources" => dictionary! {
            "Font" => dictionary! {
                "F1" => font("Helvetica"),
                "F2" => font("Helvetica-Bold"),
            },
        },
        "Contents" => content_id,
    }))
}

fn text_line(
    operations: &mut Vec<Operation>,
    font: &str,
    size: f32,
    (x_mm, y_mm): (f32, f32),
    text: &str,
) {
    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new("Tf", vec![font.into(), size.into()]));
    operations.push(Operation::new(
        "Td",
        vec![mm_to_pt(x_mm).into(), page_y(y_mm).into()],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(encode_text(text), StringFormat::Literal)],
    ));
    operations.push(Operation::new("ET", vec![]));
}

/// Encodes text for a WinAnsi font. Characters outside the encoding
/// become `?`.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => {
                u8::try_from(u32::from(c)).unwrap_or(b'?')
            }
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}
