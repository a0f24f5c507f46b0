// 拡張子の抽出と書き換え
//
// パスは文字列のまま扱う。区切り文字は `/` と `\` の両方を認める。

/// 最終セグメントの開始位置
fn basename_start(path: &str) -> usize {
    path.rfind(|c| c == '/' || c == '\\')
        .map(|index| index + 1)
        .unwrap_or(0)
}

/// 最終セグメント内の拡張子ドット位置（パス全体でのインデックス）
///
/// `.bashrc` のような先頭ドットは拡張子として扱わない。
fn extension_dot(path: &str) -> Option<usize> {
    let start = basename_start(path);
    match path[start..].rfind('.') {
        Some(0) | None => None,
        Some(offset) => Some(start + offset),
    }
}

/// パスから拡張子を取り出す（ドットは含まない）
pub fn extension_of(path: &str) -> Option<&str> {
    extension_dot(path).map(|dot| &path[dot + 1..])
}

/// 拡張子を `ext` に置き換えたパスを返す
///
/// 拡張子が無いパスには `.ext` を付加し、`ext` が空なら拡張子を取り除く。
pub fn replace_extension(path: &str, ext: &str) -> String {
    let stem = match extension_dot(path) {
        Some(dot) => &path[..dot],
        None => path,
    };

    if ext.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{ext}")
    }
}

/// 設定値の拡張子を正規化（先頭のドットを一つだけ取り除く）
pub fn normalize_extension(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}
