mod app;
mod session;
mod theme;
mod widgets;

use std::process;
use std::sync::Mutex;

use app::App;

fn main() -> iced::Result {
    env_logger::init();

    let session = match session::build(std::env::args_os().nth(1)) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // The viewer owns the camera handle and is not cloneable, so it is
    // handed to the application exactly once.
    let slot = Mutex::new(Some(session));

    iced::application(move || App::new(&slot), App::update, App::view)
        .title("FaceWatch")
        .theme(App::theme)
        .subscription(App::subscription)
        .window(iced::window::Settings {
            size: iced::Size::new(480.0, 720.0),
            exit_on_close_request: false,
            ..Default::default()
        })
        .run()
}
