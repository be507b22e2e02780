fn main() {
    if let Err(e) = expense_tracker_lib::run() {
        eprintln!("アプリケーションの実行に失敗しました: {e}");
        std::process::exit(1);
    }
}
