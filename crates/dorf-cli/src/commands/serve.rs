use std::io::{self, BufRead, Write};

use dorf_simulation::SharedSimulation;
use dorf_simulation::protocol::{self, Response};
use tracing::{debug, info};

use crate::WorldArgs;

/// Answer JSON commands from stdin until it closes.
///
/// Every non-blank line gets exactly one response line. The world is saved
/// after each successful tick or reset.
pub fn run(args: &WorldArgs) -> Result<(), String> {
    let shared = SharedSimulation::new(super::open(args)?);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    info!("serving commands on stdin");

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| format!("cannot read stdin: {e}"))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match protocol::parse_request(line) {
            Ok(request) => {
                let mutation = request.is_mutation();
                let response = protocol::handle(&shared, request);
                if mutation && response.ok {
                    super::persist(args, &shared.save())?;
                }
                response
            }
            Err(message) => {
                debug!(%message, "bad request");
                Response::error(message)
            }
        };

        let out = serde_json::to_string(&response).map_err(|e| e.to_string())?;
        writeln!(stdout, "{out}").map_err(|e| format!("cannot write stdout: {e}"))?;
        stdout
            .flush()
            .map_err(|e| format!("cannot write stdout: {e}"))?;
    }
    Ok(())
}
