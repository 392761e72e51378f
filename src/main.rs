fn is_json_mode_args() -> bool {
    std::env::args().any(|arg| arg == "--json")
}

fn report(err: &erp_console::CliError) -> ! {
    if err.code == 0 {
        // --help / --version
        print!("{}", err.message);
        std::process::exit(0);
    }
    if is_json_mode_args() {
        let payload = serde_json::json!({
            "error": {
                "code": err.code,
                "kind": err.kind,
                "message": err.message,
                "hint": err.hint,
                "retryable": err.retryable,
            }
        });
        eprintln!("{payload}");
    } else {
        eprintln!("{}", console::style(format!("error: {}", err.message)).red());
        if let Some(hint) = &err.hint {
            eprintln!("hint: {hint}");
        }
    }
    std::process::exit(err.code);
}

fn main() -> anyhow::Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();

    let raw_args: Vec<String> = std::env::args().collect();
    let parsed = match erp_console::parse_cli(raw_args) {
        Ok(parsed) => parsed,
        Err(err) => report(&err),
    };

    match erp_console::run_with_parsed(parsed) {
        Ok(()) => Ok(()),
        Err(err) => report(&err),
    }
}
