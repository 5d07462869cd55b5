// The values below are the placeholders the config layer rejects,
// so a freshly written file fails fast until edited.
pub const ENV_TEMPLATE: &str = "# Supabase credentials (dashboard: Settings > API)
SUPABASE_URL=https://your-supabase-url.supabase.co
SUPABASE_ANON_KEY=your-anon-key
";
