fn main() {
    if let Err(err) = devindex::run() {
        eprintln!("{}", devindex::format_error(&err));
        std::process::exit(1);
    }
}
