//! ブラウザのFileを共通状態で扱うためのラッパー

use intern_report_common::FileHandle;

#[derive(Clone, Debug)]
pub struct BrowserFile(pub web_sys::File);

impl FileHandle for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    /// ブラウザが宣言したMIMEタイプ（拡張子からOSが決める）
    fn media_type(&self) -> String {
        self.0.type_()
    }
}
