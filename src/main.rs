fn main() {
    if let Err(err) = reconcile_sheets::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
