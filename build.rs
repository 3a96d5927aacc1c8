use std::env;

fn main() {
    // GEMINI_API_KEY をビルド時に埋め込む（未設定なら起動時にエラー）
    match env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => {
            println!("cargo:rustc-env=GEMINI_API_KEY={}", key.trim());
        }
        _ => {
            println!("cargo:warning=GEMINI_API_KEY is not set; the app will refuse to start");
        }
    }

    // モデル名・APIベースURLは任意
    for name in ["GEMINI_MODEL", "GEMINI_API_BASE"] {
        if let Ok(value) = env::var(name) {
            if !value.trim().is_empty() {
                println!("cargo:warning={} set to {}", name, value.trim());
                println!("cargo:rustc-env={}={}", name, value.trim());
            }
        }
    }

    // 環境変数変更時に再ビルド
    println!("cargo:rerun-if-env-changed=GEMINI_API_KEY");
    println!("cargo:rerun-if-env-changed=GEMINI_MODEL");
    println!("cargo:rerun-if-env-changed=GEMINI_API_BASE");
}
