use crate::core::ledger;
use crate::domain::model::Route;
use crate::utils::error::Result;
use csv::WriterBuilder;
use std::io::Write;

/// Writes the price breakdown as CSV: one row per ledger line in order, then
/// a `total` row with the itemized sum.
pub fn write_breakdown_csv<W: Write>(route: &Route, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(["id", "item", "price"])?;
    for item in ledger::list_items(route) {
        csv_writer.write_record([item.id().to_string(), item.item().to_string(), item.price().to_string()])?;
    }
    let sum = ledger::itemized_sum(ledger::list_items(route));
    csv_writer.write_record(["".to_string(), "total".to_string(), sum.to_string()])?;
    csv_writer.flush()?;
    Ok(())
}

pub fn breakdown_csv_string(route: &Route) -> Result<String> {
    let mut buffer = Vec::new();
    write_breakdown_csv(route, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
