use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar drawn to stderr. Hidden automatically when stderr is not a terminal.
pub fn progress_bar(len: u64, msg: String) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise} / {eta_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
    {
        bar.set_style(style.progress_chars("##-"));
    }
    bar.set_message(msg);

    bar
}
