fn main() {
    if let Err(e) = pvt_rs::adapters::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
