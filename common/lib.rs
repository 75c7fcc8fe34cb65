pub mod trace {
    use colored::Colorize;
    use regex::Regex;
    use std::fs::File;
    use std::io::Write;
    use std::thread;
    use tokio::time::Instant;

    const THREAD_ID_REGEX_STR: &str = "ThreadId\\(([[:digit:]]+)\\)";

    pub enum Output {
        Stderr,
        /// Used when the terminal belongs to the UI.
        File(File),
    }

    pub fn init(maybe_filter: Option<String>) {
        init_with(maybe_filter, None, Output::Stderr);
    }

    /// Installs the global logger once; later calls are no-ops and return false.
    pub fn init_with(maybe_filter: Option<String>, maybe_level: Option<&str>, output: Output) -> bool {
        let launch_time = Instant::now();
        let target_regex_str = maybe_filter.unwrap_or_else(|| "(.*)".to_string());
        let target_regex = match Regex::new(target_regex_str.as_str()) {
            Ok(regex) => regex,
            Err(err) => {
                eprintln!("Invalid trace filter '{}': {}", target_regex_str, err);
                return false;
            }
        };
        let thread_regex = Regex::new(THREAD_ID_REGEX_STR).unwrap();

        let mut binding = env_logger::builder();
        if let Some(level) = maybe_level {
            binding.parse_filters(level);
        }

        match output {
            Output::Stderr => {}
            Output::File(file) => {
                colored::control::set_override(false);
                binding.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        let builder = binding.format(move |buf, record| {
            let target_str = record.target();
            let target_str = match target_regex.captures(target_str) {
                Some(captures) => captures
                    .get(1)
                    .or_else(|| captures.get(0))
                    .map(|m| m.as_str())
                    .unwrap_or(target_str),
                None => return Ok(()),
            };

            let thread_id_str = format!("{:?}", thread::current().id());
            let thread_id_str = thread_regex
                .captures(thread_id_str.as_str())
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
                .unwrap_or(thread_id_str);

            let elapsed = Instant::now() - launch_time;
            let elapsed = elapsed.as_millis() as f32 / 1000.;

            writeln!(
                buf,
                "{:<8}{:<4}{:<6}{:<15}{}",
                elapsed.to_string().blue().bold(),
                thread_id_str.green().bold(),
                record.level().to_string().yellow(),
                target_str.red().bold(),
                record.args(),
            )
        });
        builder.try_init().is_ok()
    }
}
