/// ターミナル画面（入力処理と描画）
pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use app::App;

/// 画面ループを実行する
///
/// 通信は`rt.block_on`で完了まで待つため、同時に実行される操作は常に一つだけ。
/// ループの結果に関わらず端末の状態は元に戻す。
pub fn run_tui(
    app: &mut App,
    api_client: &ApiClient,
    rt: &tokio::runtime::Runtime,
) -> AppResult<()> {
    enable_raw_mode()
        .map_err(|e| AppError::terminal(format!("rawモードを有効化できません: {e}")))?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(AppError::terminal(format!("代替画面に切り替えられません: {e}")));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            return Err(AppError::from(e));
        }
    };

    info!("画面ループを開始します");
    let loop_result = event_loop(&mut terminal, app, api_client, rt);

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();
    info!("画面ループを終了しました");

    loop_result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    api_client: &ApiClient,
    rt: &tokio::runtime::Runtime,
) -> AppResult<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(200))? {
            if let Event::Key(key) = event::read()? {
                let action = app.handle_key(key);
                if action != app::Action::None {
                    debug!("操作を実行します: {action:?}");
                    rt.block_on(app.perform(action, api_client));
                }
            }
        }
    }
}
