//! Minimal HTML page shells.
//!
//! The portal deliberately ships no template pipeline; every view is a small
//! static shell with a flash block at the top. Dynamic values are escaped
//! before interpolation.

use alloy::primitives::{Address, U256};

use crate::http::flash::Notice;
use crate::market::types::{Ad, Estate};

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body in the common page shell, rendering pending notices first.
pub fn page(title: &str, notices: &[Notice], body: &str) -> String {
    let mut flash = String::new();
    for notice in notices {
        flash.push_str(&format!(
            "<p class=\"flash {}\">{}</p>\n",
            notice.severity.as_str(),
            escape(&notice.message)
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{flash}{body}\n</body>\n</html>\n",
        title = escape(title),
        flash = flash,
        body = body
    )
}

pub fn landing() -> String {
    "<ul>\n\
     <li><a href=\"/register\">Регистрация</a></li>\n\
     <li><a href=\"/login\">Вход</a></li>\n\
     <li><a href=\"/get_estates\">Недвижимость</a></li>\n\
     <li><a href=\"/get_ads\">Объявления</a></li>\n\
     </ul>"
        .to_string()
}

pub fn register_form() -> String {
    "<form method=\"post\" action=\"/register\">\n\
     <label>Пароль <input type=\"password\" name=\"password\"></label>\n\
     <button type=\"submit\">Создать аккаунт</button>\n\
     </form>"
        .to_string()
}

pub fn login_form() -> String {
    "<form method=\"post\" action=\"/login\">\n\
     <label>Адрес <input type=\"text\" name=\"public_key\"></label>\n\
     <label>Пароль <input type=\"password\" name=\"password\"></label>\n\
     <button type=\"submit\">Войти</button>\n\
     </form>"
        .to_string()
}

pub fn dashboard(address: Address) -> String {
    let addr = escape(&address.to_string());
    format!(
        "<p>Аккаунт: {addr}</p>\n<ul>\n\
         <li><a href=\"/create_estate?public_key={addr}\">Создать недвижимость</a></li>\n\
         <li><a href=\"/create_ad?public_key={addr}\">Создать объявление</a></li>\n\
         <li><a href=\"/buy_estate?public_key={addr}\">Купить недвижимость</a></li>\n\
         <li><a href=\"/withdraw_funds?public_key={addr}\">Вывести средства</a></li>\n\
         <li><a href=\"/change_estate_status?public_key={addr}\">Изменить статус недвижимости</a></li>\n\
         <li><a href=\"/change_ad_status?public_key={addr}\">Изменить статус объявления</a></li>\n\
         <li><a href=\"/get_balance/{addr}\">Баланс</a></li>\n\
         <li><a href=\"/get_estates\">Недвижимость</a></li>\n\
         <li><a href=\"/get_ads\">Объявления</a></li>\n\
         </ul>"
    )
}

fn action_form(path: &str, actor: &str, fields: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}?public_key={}\">\n{}\
         <button type=\"submit\">{}</button>\n</form>",
        path,
        escape(actor),
        fields,
        submit
    )
}

pub fn create_estate_form(actor: &str) -> String {
    action_form(
        "/create_estate",
        actor,
        "<label>Площадь <input type=\"text\" name=\"size\"></label>\n\
         <label>Фото <input type=\"text\" name=\"photo\"></label>\n\
         <label>Комнаты <input type=\"text\" name=\"rooms\"></label>\n\
         <label>Тип <select name=\"estate_type\">\n\
         <option>Дом</option><option>Квартира</option><option>Мансарда</option>\n\
         </select></label>\n",
        "Создать",
    )
}

pub fn create_ad_form(actor: &str) -> String {
    action_form(
        "/create_ad",
        actor,
        "<label>ID недвижимости <input type=\"text\" name=\"estate_id\"></label>\n\
         <label>Цена <input type=\"text\" name=\"price\"></label>\n",
        "Создать",
    )
}

pub fn buy_estate_form(actor: &str) -> String {
    action_form(
        "/buy_estate",
        actor,
        "<label>ID объявления <input type=\"text\" name=\"ad_id\"></label>\n\
         <label>Цена <input type=\"text\" name=\"price\"></label>\n",
        "Купить",
    )
}

pub fn withdraw_funds_form(actor: &str) -> String {
    action_form(
        "/withdraw_funds",
        actor,
        "<label>Сумма <input type=\"text\" name=\"amount\"></label>\n",
        "Вывести",
    )
}

pub fn change_estate_status_form(actor: &str) -> String {
    action_form(
        "/change_estate_status",
        actor,
        "<label>ID недвижимости <input type=\"text\" name=\"estate_id\"></label>\n",
        "Изменить",
    )
}

pub fn change_ad_status_form(actor: &str) -> String {
    action_form(
        "/change_ad_status",
        actor,
        "<label>ID объявления <input type=\"text\" name=\"ad_id\"></label>\n",
        "Изменить",
    )
}

pub fn estates_table(estates: &[Estate]) -> String {
    let mut rows = String::new();
    for (i, estate) in estates.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            estate.size,
            escape(&estate.photo),
            estate.rooms,
            estate.kind.label(),
            if estate.active { "активна" } else { "снята" },
            escape(&estate.owner.to_string()),
        ));
    }
    format!(
        "<table>\n<tr><th>#</th><th>Площадь</th><th>Фото</th><th>Комнаты</th>\
         <th>Тип</th><th>Статус</th><th>Владелец</th></tr>\n{}</table>",
        rows
    )
}

pub fn ads_table(ads: &[Ad]) -> String {
    let mut rows = String::new();
    for (i, ad) in ads.iter().enumerate() {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            i + 1,
            ad.estate_id,
            ad.price,
            ad.status.label(),
            escape(&ad.owner.to_string()),
        ));
    }
    format!(
        "<table>\n<tr><th>#</th><th>Недвижимость</th><th>Цена</th><th>Статус</th><th>Продавец</th></tr>\n{}</table>",
        rows
    )
}

pub fn balance_view(address: Address, balance: U256) -> String {
    format!(
        "<p>Аккаунт: {}</p>\n<p>Баланс: {} wei</p>",
        escape(&address.to_string()),
        balance
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::flash::Notice;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape("<script>alert('1')</script>"),
            "&lt;script&gt;alert(&#39;1&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape("a & b"), "a &amp; b");
    }

    #[test]
    fn page_renders_notices_before_body() {
        let notices = vec![Notice::danger("узел недоступен")];
        let html = page("Вход", &notices, "<p>форма</p>");
        let flash_pos = html.find("flash danger").unwrap();
        let body_pos = html.find("<p>форма</p>").unwrap();
        assert!(flash_pos < body_pos);
        assert!(html.contains("узел недоступен"));
    }

    #[test]
    fn notice_text_is_escaped() {
        let notices = vec![Notice::success("<b>done</b>")];
        let html = page("x", &notices, "");
        assert!(!html.contains("<b>done</b>"));
        assert!(html.contains("&lt;b&gt;done&lt;/b&gt;"));
    }
}
