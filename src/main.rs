//! glslink CLI entry point

fn main() {
    let cli = glslink::cli::parse();

    // Structured logging on stderr (stdout carries assembled sources). `--debug` raises glslink to debug.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(glslink::cli::log_filter(cli.preprocess.debug))
        .try_init();

    glslink::cli::run(cli);
}
