//! zaia - entry point

use std::env;
use std::io;
use std::sync::Arc;

use zaia::app::context::AppContext;
use zaia::app::options::AppOptions;
use zaia::app::run::run_with;
use zaia::http::logs::HttpLogFetcher;
use zaia::http::port::RestConnector;
use zaia::logs::init_logging;
use zaia::output::envelope::Envelope;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    // logging must be up before parsing, so peek at the global flag
    let debug = args.iter().skip(1).any(|a| a == "--debug");
    let options = AppOptions::from_env().with_debug(debug);
    let _ = init_logging(&options.log);

    let mut stdout = io::stdout().lock();
    let log_fetcher = match HttpLogFetcher::new(options.api_timeout) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            let envelope = Envelope::error(&e);
            let _ = envelope.write_to(&mut stdout);
            std::process::exit(envelope.exit_code());
        }
    };

    let connector = Arc::new(RestConnector::new(options.api_timeout));
    let ctx = AppContext::new(options, connector, Arc::new(log_fetcher));

    let code = run_with(args, &ctx, &mut stdout).await;
    std::process::exit(code);
}
