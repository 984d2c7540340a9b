use crate::catalog::EnrichedListing;
use crate::errors::{ResultResp, ServerError};
use crate::responses::xlsx_response;
use rust_xlsxwriter::Workbook;

/// One worksheet, one row per listing, in the order the query returned.
pub fn export_listings_xlsx(listings: &[EnrichedListing]) -> ResultResp {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    // Headers
    let headers = [
        "Provider",
        "Title",
        "Price",
        "Size",
        "Rooms",
        "Price per m²",
        "Address",
        "URL",
    ];

    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).map_err(|e| {
            ServerError::Xlsx(format!("Failed to write header '{header}': {e}"))
        })?;
    }

    // Rows
    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;

        worksheet
            .write_string(r, 0, listing.provider.as_str())
            .map_err(|e| ServerError::Xlsx(format!("Failed to write provider: {e}")))?;

        worksheet
            .write_string(r, 1, &listing.title)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write title: {e}")))?;

        worksheet
            .write_number(r, 2, listing.price)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write price: {e}")))?;

        worksheet
            .write_number(r, 3, listing.size)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write size: {e}")))?;

        worksheet
            .write_number(r, 4, listing.rooms)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write rooms: {e}")))?;

        // Unknown square-meter price stays a blank cell.
        match listing.square_meter_price {
            Some(value) => {
                worksheet
                    .write_number(r, 5, value)
                    .map_err(|e| ServerError::Xlsx(format!("Failed to write m2 price: {e}")))?;
            }
            None => {
                worksheet
                    .write_string(r, 5, "")
                    .map_err(|e| ServerError::Xlsx(format!("Failed to write m2 price: {e}")))?;
            }
        }

        let address = listing.address.as_deref().unwrap_or("");
        worksheet
            .write_string(r, 6, address)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write address: {e}")))?;

        worksheet
            .write_string(r, 7, &listing.url)
            .map_err(|e| ServerError::Xlsx(format!("Failed to write url: {e}")))?;
    }

    let buffer = workbook
        .save_to_buffer()
        .map_err(|e| ServerError::Xlsx(format!("Failed to save workbook: {e}")))?;

    xlsx_response(buffer, "listings.xlsx")
}
