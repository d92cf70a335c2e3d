/// Games hosted by the portal, in the order they are listed on the index page
pub const GAMES: &[&str] = &[
    "snake",
    "bomberman",
    "breakout",
    "pinball",
    "tetris",
    "frogger",
    "invaders",
    "racing",
];

/// Game used by `/api/recordes` when the query omits `game`
pub const DEFAULT_GAME: &str = "snake";

/// Number of entries returned by a leaderboard read
pub const TOP_SCORES_LIMIT: usize = 5;

/// Highest score accepted by a submission
pub const MAX_SCORE: i64 = 10_000;

/// Maximum username length, in characters
pub const MAX_USERNAME_LEN: usize = 20;

/// Username shown in placeholder leaderboard rows
pub const PLACEHOLDER_USERNAME: &str = "---";

/// PBKDF2 rounds for stored passwords
pub const PASSWORD_HASH_ROUNDS: u32 = 50_000;

/// Salt length for stored passwords, in bytes
pub const PASSWORD_SALT_LEN: usize = 16;

/// Timeout for requests to the remote leaderboard
pub const REMOTE_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Cookies
// =============================================================================

/// Cookie holding the signed session identity
pub const SESSION_COOKIE: &str = "portal_session";

/// Cookie holding a signed one-shot flash message
pub const FLASH_COOKIE: &str = "portal_flash";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for an unknown game name
pub const ERR_UNKNOWN_GAME: &str = "Jogo desconhecido";

/// Error message for an empty or too long username
pub const ERR_INVALID_USERNAME: &str = "Nome de usuário deve ter entre 1 e 20 caracteres";

/// Error message for a score outside the accepted range
pub const ERR_INVALID_SCORE: &str = "Pontuação deve ser um inteiro entre 0 e 10000";

/// Error message for a malformed JSON body
pub const ERR_INVALID_BODY: &str = "Dados inválidos";

/// Error message when no leaderboard backend is available
pub const ERR_BACKEND_UNAVAILABLE: &str = "Banco de dados não configurado";

// =============================================================================
// Flash Messages
// =============================================================================

pub const MSG_LOGIN_FAILED: &str = "Usuário ou senha inválidos";
pub const MSG_REGISTERED: &str = "Cadastro realizado com sucesso! Faça login.";
pub const MSG_EMPTY_FIELDS: &str = "Preencha todos os campos";
pub const MSG_USERNAME_TOO_LONG: &str = "Nome de usuário muito longo (máximo 20 caracteres)";
pub const MSG_PASSWORD_MISMATCH: &str = "As senhas não coincidem";
pub const MSG_USERNAME_RESERVED: &str = "Nome de usuário reservado";
pub const MSG_USERNAME_EXISTS: &str = "Usuário já existe";
pub const MSG_LOGGED_OUT: &str = "Você saiu da sua conta";
pub const MSG_LOGIN_REQUIRED: &str = "Faça login para acessar esta página";
pub const MSG_INTERNAL_ERROR: &str = "Erro interno, tente novamente";
