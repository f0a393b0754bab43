use crate::core::session::View;
use crate::core::{Parcel, ParcelInput};
use std::fmt::Write;

pub const EMPTY_LIST: &str = "No parcels found";
pub const NO_DESCRIPTION: &str = "No description";

const HEADERS: [&str; 5] = ["ID", "Name", "Description", "Quantity", "Weight (kg)"];
const DESCRIPTION_WIDTH: usize = 40;

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn row(parcel: &Parcel) -> [String; 5] {
    let description = if parcel.description.trim().is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        // Single line, like the table cell it replaces.
        truncate(&parcel.description.replace(['\r', '\n'], " "), DESCRIPTION_WIDTH)
    };
    [
        parcel.id.clone(),
        parcel.name.clone(),
        description,
        format!("{} pcs", parcel.quantity),
        format!("{} kg", parcel.weight),
    ]
}

/// Renders the list view as an aligned text table.
pub fn render_list(parcels: &[Parcel]) -> String {
    if parcels.is_empty() {
        return format!("{}\n", EMPTY_LIST);
    }

    let rows: Vec<[String; 5]> = parcels.iter().map(row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for r in &rows {
        for (w, cell) in widths.iter_mut().zip(r.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut push_line = |cells: &[&str]| {
        let line: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    };

    push_line(&HEADERS);
    for r in &rows {
        let cells: Vec<&str> = r.iter().map(String::as_str).collect();
        push_line(&cells);
    }
    out
}

pub fn render_parcel(parcel: &Parcel) -> String {
    let description = if parcel.description.is_empty() {
        NO_DESCRIPTION
    } else {
        parcel.description.as_str()
    };
    format!(
        "id: {}\nname: {}\ndescription: {}\nquantity: {} pcs\nweight: {} kg\n",
        parcel.id, parcel.name, description, parcel.quantity, parcel.weight
    )
}

pub fn form_title(view: &View) -> Option<&'static str> {
    match view {
        View::Listing => None,
        View::Adding => Some("Add New Parcel"),
        View::Editing(_) => Some("Edit Parcel"),
    }
}

pub fn submit_label(view: &View) -> Option<&'static str> {
    match view {
        View::Listing => None,
        View::Adding => Some("Create Parcel"),
        View::Editing(_) => Some("Update Parcel"),
    }
}

/// The open form with its current values.
pub fn render_form(view: &View, form: &ParcelInput) -> String {
    let mut out = String::new();
    if let Some(title) = form_title(view) {
        let _ = writeln!(out, "{}", title);
    }
    let _ = writeln!(out, "Name *: {}", form.name);
    let _ = writeln!(out, "Description: {}", form.description);
    let _ = writeln!(out, "Quantity *: {}", form.quantity);
    let _ = writeln!(out, "Weight (kg) *: {}", form.weight);
    if let Some(label) = submit_label(view) {
        let _ = writeln!(out, "[Cancel] [{}]", label);
    }
    out
}
