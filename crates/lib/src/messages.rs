//! User-visible text (Traditional Chinese).

pub const BETTING_TITLE: &str = "賭場遊戲";
pub const BET_BUTTON: &str = "下注";

pub const RESULT_TITLE: &str = "結果";
pub const WIN_BODY: &str = "恭喜你贏了！獲得200積分。";
pub const LOSE_BODY: &str = "很遺憾，你輸了。";

pub const INSUFFICIENT_TITLE: &str = "積分不足";
pub const INSUFFICIENT_BODY: &str = "積分不足，無法下注！";

pub const AT_LIMIT_TITLE: &str = "無法下注";
pub const AT_LIMIT_BODY: &str = "積分已達上限，無法再獲得獎勵！";

pub const LOADING_TITLE: &str = "遊戲加載中";
pub const LOADING_LABEL: &str = "正在加載遊戲...";

pub const LOBBY_TITLE: &str = "遊戲大廳";
pub const ENTER_CASINO_BUTTON: &str = "進入賭場";
pub const ERROR_TITLE: &str = "錯誤";
pub const CASINO_ENTRY_REFUSED_BODY: &str = "積分不足，無法進入賭場遊戲";

pub const OK_BUTTON: &str = "確定";

/// Label shown inside the betting dialog.
pub fn credit_label(credits: u64) -> String {
    format!("當前積分：{}", credits)
}

/// Label shown on the lobby screen.
pub fn lobby_credit_label(credits: u64) -> String {
    format!("積分：{}", credits)
}

/// Win body for a payout other than the default 200.
pub fn win_body(payout: u64) -> String {
    if payout == 200 {
        WIN_BODY.to_string()
    } else {
        format!("恭喜你贏了！獲得{}積分。", payout)
    }
}
