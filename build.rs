use std::env;

fn main() {
    // ビルド時に環境変数を埋め込む
    // 実行時の環境変数が優先され、ここで埋め込んだ値はフォールバックとして使われる
    // API_SERVER_URLにはデフォルト値を設けない（未設定ならすべてのリクエストが失敗する）

    println!("cargo:rerun-if-env-changed=API_SERVER_URL");
    println!("cargo:rerun-if-env-changed=API_TIMEOUT_SECONDS");

    // API設定
    if let Ok(api_server_url) = env::var("API_SERVER_URL") {
        println!("cargo:rustc-env=API_SERVER_URL={}", api_server_url);
        println!("cargo:warning=APIサーバーURL: {}", api_server_url);
    }

    if let Ok(api_timeout) = env::var("API_TIMEOUT_SECONDS") {
        println!("cargo:rustc-env=API_TIMEOUT_SECONDS={}", api_timeout);
    }
}
