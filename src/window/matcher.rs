use crate::error::Result;
use regex::Regex;
use std::fmt;

/// Поле окна, по которому xdotool ищет совпадение
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    Name,
    Class,
    Classname,
}

impl MatchField {
    pub const ALL: [MatchField; 3] = [MatchField::Name, MatchField::Class, MatchField::Classname];

    pub fn flag(&self) -> &'static str {
        match self {
            MatchField::Name => "--name",
            MatchField::Class => "--class",
            MatchField::Classname => "--classname",
        }
    }
}

/// Шаблон поиска: точная строка или регулярное выражение.
///
/// Регулярное выражение передаётся утилите своим исходным текстом,
/// сопоставление выполняет сам xdotool.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Текст уходит в xdotool как есть, а тот трактует его как регулярное
    /// выражение без учёта регистра и ищет вхождение: `exact("Home")`
    /// совпадёт и с "Home - Files". Буквальную подстроку даёт
    /// [`Pattern::containing`], привязку к началу и концу [`Pattern::regex`].
    Exact(String),
    Regex(Regex),
}

impl Pattern {
    pub fn exact(text: impl Into<String>) -> Self {
        Pattern::Exact(text.into())
    }

    pub fn regex(source: &str) -> Result<Self> {
        Ok(Pattern::Regex(Regex::new(source)?))
    }

    /// Регулярное выражение, совпадающее с подстрокой `text` буквально
    pub fn containing(text: &str) -> Self {
        // regex::escape всегда даёт корректное выражение
        match Regex::new(&regex::escape(text)) {
            Ok(re) => Pattern::Regex(re),
            Err(_) => Pattern::Exact(text.to_string()),
        }
    }

    pub fn source(&self) -> &str {
        match self {
            Pattern::Exact(text) => text,
            Pattern::Regex(re) => re.as_str(),
        }
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Exact(a), Pattern::Exact(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Exact(text) => write!(f, "'{}'", text),
            Pattern::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// Что искать и где: шаблон, набор полей и фильтр видимости
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSpec {
    pub pattern: Pattern,
    fields: Vec<MatchField>,
    pub only_visible: bool,
}

impl MatchSpec {
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            fields: Vec::new(),
            only_visible: false,
        }
    }

    /// Поиск только по заголовку окна
    pub fn title(pattern: Pattern) -> Self {
        Self::new(pattern).with_field(MatchField::Name)
    }

    pub fn with_field(mut self, field: MatchField) -> Self {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
        self
    }

    pub fn with_fields(self, fields: impl IntoIterator<Item = MatchField>) -> Self {
        fields.into_iter().fold(self, |spec, field| spec.with_field(field))
    }

    pub fn only_visible(mut self) -> Self {
        self.only_visible = true;
        self
    }

    /// Поля поиска; пустой набор означает все поля
    pub fn fields(&self) -> &[MatchField] {
        if self.fields.is_empty() {
            &MatchField::ALL
        } else {
            &self.fields
        }
    }

    /// Аргументы `xdotool search`
    pub fn search_args(&self) -> Vec<String> {
        let mut args = vec!["search".to_string()];
        if self.only_visible {
            args.push("--onlyvisible".to_string());
        }
        args.extend(self.fields().iter().map(|field| field.flag().to_string()));
        // Шаблон с ведущим '-' иначе разбирается как опция
        args.push("--".to_string());
        args.push(self.pattern.source().to_string());
        args
    }
}

impl fmt::Display for MatchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {:?}", self.pattern, self.fields())?;
        if self.only_visible {
            write!(f, " (visible)")?;
        }
        Ok(())
    }
}
