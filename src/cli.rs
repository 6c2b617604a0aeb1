use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fridge-buddy")]
#[command(about = "レシート明細から冷蔵庫在庫を登録する食品マッチングツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レシートを照合して在庫アイテムJSONを出力
    Match {
        /// レシートファイル（.txt/.json）またはフォルダ
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 出力JSONファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 食品カタログJSON（groceryItems.json）
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 照合名JSON（groceryItemsSr.json）
        #[arg(short, long)]
        names: Option<PathBuf>,

        /// あいまい照合の閾値（省略時は設定値）
        #[arg(long)]
        threshold: Option<f32>,

        /// 登録前に対話式で確認する
        #[arg(long)]
        review: bool,
    },

    /// 1行のテキストを照合して結果を表示
    Lookup {
        /// 明細テキスト
        #[arg(required = true)]
        text: String,

        /// 食品カタログJSON
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 照合名JSON
        #[arg(short, long)]
        names: Option<PathBuf>,
    },

    /// テキストの正規化結果を表示
    Normalize {
        /// 明細テキスト
        #[arg(required = true)]
        text: String,
    },

    /// カタログ情報を表示
    Catalog {
        /// 食品カタログJSON
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// 照合名JSON
        #[arg(short, long)]
        names: Option<PathBuf>,

        /// 食品種別の一覧を表示
        #[arg(long)]
        types: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 食品カタログJSONのパスを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 照合名JSONのパスを設定
        #[arg(long)]
        set_names: Option<PathBuf>,

        /// あいまい照合の閾値を設定（0.0-1.0）
        #[arg(long)]
        set_threshold: Option<f32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
