use chrono::Local;

use crate::host::open_store;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut store = open_store();
    store.reset_today(Local::now().date_naive());
    println!("today's screen time reset");
    Ok(())
}
