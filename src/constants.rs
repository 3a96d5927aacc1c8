//! 初期テンプレート

pub const JSON_FILE_NAME: &str = "data.json";
pub const FUNCTIONS_FILE_NAME: &str = "functions.php";
pub const INDEX_FILE_NAME: &str = "index.php";

pub const INITIAL_JSON: &str = r#"{
  "faq": []
}"#;

pub const INITIAL_PHP_FUNCTIONS: &str = r#"<?php
// functions.php
function get_data() {
    return json_decode(file_get_contents('data.json'), true);
}
"#;

pub const INITIAL_PHP_INDEX: &str = r#"<?php
// index.php
require_once 'functions.php';
$data = get_data();
?>
<!DOCTYPE html>
<html>
<head><title>Page</title></head>
<body>
    <h1>Welcome</h1>
</body>
</html>
"#;

pub const INSTRUCTIONS_PLACEHOLDER: &str =
    "E.g., Add a new FAQ item about 'Return Policy' with the answer 'You can return items within 30 days.'...";
