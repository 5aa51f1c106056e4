use std::path::Path;

/// Installs the global logger. Verbosity counts `-v` flags: warnings only by
/// default, then info, debug and trace.
pub fn setup(verbosity: u8, log_file: Option<&Path>) -> Result<(), fern::InitError> {
  let level = match verbosity {
    0 => log::LevelFilter::Warn,
    1 => log::LevelFilter::Info,
    2 => log::LevelFilter::Debug,
    _ => log::LevelFilter::Trace,
  };

  let dispatch = fern::Dispatch::new()
    .level(level)
    .format(|out, message, record| {
      out.finish(format_args!(
        "{} {} [{}] {}",
        chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
        record.target(),
        record.level(),
        message
      ))
    });

  let dispatch = match log_file {
    Some(path) => dispatch.chain(fern::log_file(path)?),
    None => dispatch.chain(std::io::stderr()),
  };
  dispatch.apply()?;
  Ok(())
}
