//! Server-rendered HTML for the portal pages.

use crate::constants::GAMES;
use crate::models::ScoreRecord;
use crate::session::{Flash, FlashKind};

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn flash_html(flash: Option<&Flash>) -> String {
    match flash {
        Some(flash) => {
            let class = match flash.kind {
                FlashKind::Success => "flash flash-success",
                FlashKind::Error => "flash flash-error",
            };
            format!(
                r#"<p class="{class}">{}</p>"#,
                escape_html(&flash.message)
            )
        }
        None => String::new(),
    }
}

fn layout(title: &str, identity: Option<&str>, flash: Option<&Flash>, body: &str) -> String {
    let account = match identity {
        Some(name) => format!(
            r#"<span class="user">Olá, {}</span> <a href="/logout">Sair</a>"#,
            escape_html(name)
        ),
        None => r#"<a href="/login">Entrar</a> <a href="/register">Cadastrar</a>"#.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header><a href="/">Portal de Jogos</a> <nav>{account}</nav></header>
<main>
{flash}
{body}
</main>
</body>
</html>
"#,
        title = escape_html(title),
        flash = flash_html(flash),
    )
}

/// Portal index listing every game
pub fn index_page(identity: Option<&str>, flash: Option<&Flash>) -> String {
    let games: String = GAMES
        .iter()
        .map(|game| {
            format!(
                r#"<li><a href="/{game}/">{}</a></li>"#,
                title_case(game)
            )
        })
        .collect();

    layout(
        "Portal de Jogos",
        identity,
        flash,
        &format!("<h1>Escolha um jogo</h1>\n<ul class=\"games\">{games}</ul>"),
    )
}

pub fn login_page(flash: Option<&Flash>) -> String {
    layout(
        "Entrar",
        None,
        flash,
        r#"<h1>Entrar</h1>
<form method="post" action="/login">
<label>Usuário <input name="usuario" maxlength="20" required></label>
<label>Senha <input name="senha" type="password" required></label>
<button type="submit">Entrar</button>
</form>
<p><a href="/register">Criar conta</a></p>"#,
    )
}

pub fn register_page(flash: Option<&Flash>) -> String {
    layout(
        "Cadastrar",
        None,
        flash,
        r#"<h1>Cadastrar</h1>
<form method="post" action="/register">
<label>Usuário <input name="usuario" maxlength="20" required></label>
<label>Senha <input name="senha" type="password" required></label>
<label>Confirmar senha <input name="confirmar_senha" type="password" required></label>
<button type="submit">Cadastrar</button>
</form>
<p><a href="/login">Já tenho conta</a></p>"#,
    )
}

/// Maintenance page with every score row and the rename form
///
/// `records` is `None` when the leaderboard could not be read.
pub fn admin_page(
    identity: &str,
    flash: Option<&Flash>,
    records: Option<&[ScoreRecord]>,
) -> String {
    let table = match records {
        Some([]) => "<p>Nenhum recorde salvo.</p>".to_string(),
        Some(records) => {
            let rows: String = records
                .iter()
                .map(|r| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                        escape_html(&r.game),
                        escape_html(&r.username),
                        r.score
                    )
                })
                .collect();
            format!(
                "<table><thead><tr><th>Jogo</th><th>Usuário</th><th>Pontos</th></tr></thead>\
                 <tbody>{rows}</tbody></table>"
            )
        }
        None => r#"<p class="flash flash-error">Banco de dados indisponível.</p>"#.to_string(),
    };

    layout(
        "Painel",
        Some(identity),
        flash,
        &format!(
            r#"<h1>Recordes</h1>
{table}
<h2>Renomear usuário</h2>
<form method="post" action="/admin/rename">
<label>Nome atual <input name="antigo" required></label>
<label>Novo nome <input name="novo" maxlength="20" required></label>
<button type="submit">Renomear</button>
</form>"#
        ),
    )
}

/// Expose the logged-in user to a game page as `window.currentUser`
pub fn inject_current_user(html: &str, identity: Option<&str>) -> String {
    let value = serde_json::to_string(&identity)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    let script = format!("<script>window.currentUser = {value};</script>");

    match html.find("</head>") {
        Some(pos) => format!("{}{}\n{}", &html[..pos], script, &html[pos..]),
        None => format!("{script}\n{html}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x('y')">&</b>"#),
            "&lt;b onclick=&quot;x(&#39;y&#39;)&quot;&gt;&amp;&lt;/b&gt;"
        );
        assert_eq!(escape_html("Ana"), "Ana");
    }

    #[test]
    fn test_index_lists_games_and_identity() {
        let html = index_page(Some("<Ana>"), Some(&Flash::success("Bem-vindo")));

        for game in GAMES {
            assert!(html.contains(&format!("href=\"/{game}/\"")));
        }
        assert!(html.contains("Snake"));
        assert!(html.contains("Olá, &lt;Ana&gt;"));
        assert!(html.contains("flash-success"));
        assert!(html.contains("/logout"));

        let anonymous = index_page(None, None);
        assert!(anonymous.contains("/login"));
        assert!(!anonymous.contains("flash"));
    }

    #[test]
    fn test_forms_use_expected_field_names() {
        let login = login_page(None);
        assert!(login.contains(r#"name="usuario""#));
        assert!(login.contains(r#"name="senha""#));

        let register = register_page(None);
        assert!(register.contains(r#"name="confirmar_senha""#));
    }

    #[test]
    fn test_admin_page_states() {
        let records = vec![ScoreRecord {
            username: "Ana".to_string(),
            game: "snake".to_string(),
            score: 80,
        }];

        let html = admin_page("admin", None, Some(records.as_slice()));
        assert!(html.contains("<td>snake</td><td>Ana</td><td>80</td>"));

        assert!(admin_page("admin", None, Some(&[][..])).contains("Nenhum recorde"));
        assert!(admin_page("admin", None, None).contains("indisponível"));
    }

    #[test]
    fn test_inject_current_user() {
        let html = "<html><head><title>Snake</title></head><body></body></html>";

        let injected = inject_current_user(html, Some("Ana"));
        assert!(injected.contains("<script>window.currentUser = \"Ana\";</script>\n</head>"));

        let anonymous = inject_current_user(html, None);
        assert!(anonymous.contains("window.currentUser = null;"));

        // Without a head the script goes first
        let bare = inject_current_user("<canvas></canvas>", Some("Ana"));
        assert!(bare.starts_with("<script>"));

        // A crafted name cannot close the script element
        let crafted = inject_current_user(html, Some("</script><b>"));
        assert!(!crafted.contains("\"</script>"));
    }
}
