//! Delivery note PDF generation.
//!
//! A stock-in transaction can be printed as an inbound delivery note: a
//! header with warehouse, reference and date, an item table and signature
//! lines. The upstream record is shaped into [`DeliveryNote`] first so the
//! layout code never touches raw JSON.

use genpdf::{elements, style, Alignment, Element};
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Directory the Roboto font family is loaded from at render time.
const FONT_DIR: &str = "./fonts";

/// One printable line of a delivery note.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryNoteItem {
    pub sku: String,
    pub name: String,
    pub qty: i64,
}

impl DeliveryNoteItem {
    fn from_value(item: &Value) -> Self {
        let field = |key: &str| {
            item.get("product")
                .and_then(|product| product.get(key))
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string()
        };

        Self {
            sku: field("sku"),
            name: field("name"),
            qty: item.get("qty").and_then(Value::as_i64).unwrap_or(0),
        }
    }
}

/// Printable view of a stock-in transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryNote {
    pub stock_in_id: i64,
    pub warehouse_name: String,
    pub reference: String,
    pub date_in: String,
    pub items: Vec<DeliveryNoteItem>,
}

impl DeliveryNote {
    /// Shapes an upstream stock-in record into a delivery note.
    ///
    /// Missing fields render as "-" rather than failing the print, matching
    /// how partially filled transactions are displayed elsewhere.
    pub fn from_stock_in(record: &Value) -> Self {
        let text = |value: Option<&Value>| {
            value.and_then(Value::as_str).unwrap_or("-").to_string()
        };

        let items = record
            .get("items")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(DeliveryNoteItem::from_value).collect())
            .unwrap_or_default();

        Self {
            stock_in_id: record.get("id").and_then(Value::as_i64).unwrap_or(0),
            warehouse_name: text(
                record.get("warehouse").and_then(|w| w.get("name")),
            ),
            reference: text(record.get("reference")),
            date_in: text(record.get("date_in")),
            items,
        }
    }

    pub fn total_qty(&self) -> i64 {
        self.items.iter().map(|item| item.qty).sum()
    }

    pub fn file_name(&self) -> String {
        format!("delivery-note-{}.pdf", self.stock_in_id)
    }
}

/// Renders a delivery note to PDF bytes.
///
/// Requires the Roboto font family under `./fonts` next to the binary.
pub fn render_delivery_note(note: &DeliveryNote) -> AppResult<Vec<u8>> {
    let font_family = genpdf::fonts::from_files(FONT_DIR, "Roboto", None)
        .map_err(|e| AppError::Document(format!("font family not found in {FONT_DIR}: {e}")))?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(format!("Delivery Note #{}", note.stock_in_id));
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new("Inbound Delivery Note")
            .styled(style::Style::new().bold().with_font_size(16)),
    );
    doc.push(elements::Break::new(1.5));

    doc.push(elements::Paragraph::new(format!(
        "Warehouse: {}",
        note.warehouse_name
    )));
    doc.push(elements::Paragraph::new(format!(
        "Reference: {}",
        note.reference
    )));
    doc.push(elements::Paragraph::new(format!("Date: {}", note.date_in)));
    doc.push(elements::Break::new(2));

    let header_style = style::Style::new().bold();
    let mut table = elements::TableLayout::new(vec![2, 5, 1]);
    table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

    table
        .row()
        .element(elements::Paragraph::new("SKU").styled(header_style))
        .element(elements::Paragraph::new("Product Name").styled(header_style))
        .element(elements::Paragraph::new("Qty").styled(header_style))
        .push()
        .map_err(|e| AppError::Document(e.to_string()))?;

    for item in &note.items {
        table
            .row()
            .element(elements::Paragraph::new(item.sku.clone()))
            .element(elements::Paragraph::new(item.name.clone()))
            .element(elements::Paragraph::new(item.qty.to_string()))
            .push()
            .map_err(|e| AppError::Document(e.to_string()))?;
    }

    doc.push(table);
    doc.push(elements::Break::new(1));

    let mut total = elements::Paragraph::new(format!("Total Qty: {}", note.total_qty()));
    total.set_alignment(Alignment::Right);
    doc.push(total.styled(style::Style::new().bold()));
    doc.push(elements::Break::new(3));

    let mut signatures = elements::TableLayout::new(vec![1, 1]);
    signatures
        .row()
        .element(elements::Paragraph::new("Prepared by,"))
        .element(elements::Paragraph::new("Received by,"))
        .push()
        .map_err(|e| AppError::Document(e.to_string()))?;
    signatures
        .row()
        .element(elements::Paragraph::new("______________________"))
        .element(elements::Paragraph::new("______________________"))
        .push()
        .map_err(|e| AppError::Document(e.to_string()))?;
    doc.push(elements::Break::new(3));
    doc.push(signatures);

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::Document(e.to_string()))?;

    Ok(buffer)
}
