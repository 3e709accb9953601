//! Keyword resolution.
//!
//! Lookups take lower-cased text. Single words are length-bucketed; the
//! multi-word forms (`end if`, `exit for`, ...) take the two words joined by
//! exactly one space, however much whitespace separated them in source.

use brs_ir::Lexeme;

/// First words that may start a multi-word keyword.
#[inline]
pub(crate) fn starts_multi_word(lower: &str) -> bool {
    matches!(lower, "end" | "else" | "exit" | "for")
}

/// Look up a single-word keyword by lower-cased text.
pub fn lookup(lower: &str) -> Option<Lexeme> {
    let len = lower.len();
    if !(2..=11).contains(&len) {
        return None;
    }

    match len {
        2 => match lower {
            "if" => Some(Lexeme::If),
            "in" => Some(Lexeme::In),
            "or" => Some(Lexeme::Or),
            "to" => Some(Lexeme::To),
            _ => None,
        },
        3 => match lower {
            "and" => Some(Lexeme::And),
            "dim" => Some(Lexeme::Dim),
            "end" => Some(Lexeme::End),
            "for" => Some(Lexeme::For),
            "let" => Some(Lexeme::Let),
            "mod" => Some(Lexeme::Mod),
            "not" => Some(Lexeme::Not),
            "sub" => Some(Lexeme::Sub),
            _ => None,
        },
        4 => match lower {
            "else" => Some(Lexeme::Else),
            "exit" => Some(Lexeme::Exit),
            "goto" => Some(Lexeme::Goto),
            "next" => Some(Lexeme::Next),
            "step" => Some(Lexeme::Step),
            "stop" => Some(Lexeme::Stop),
            "then" => Some(Lexeme::Then),
            "true" => Some(Lexeme::True),
            _ => None,
        },
        5 => match lower {
            "endif" => Some(Lexeme::EndIf),
            "false" => Some(Lexeme::False),
            "print" => Some(Lexeme::Print),
            "while" => Some(Lexeme::While),
            _ => None,
        },
        6 => match lower {
            "elseif" => Some(Lexeme::ElseIf),
            "endfor" => Some(Lexeme::EndFor),
            "endsub" => Some(Lexeme::EndSub),
            "return" => Some(Lexeme::Return),
            _ => None,
        },
        7 => match lower {
            "exitfor" => Some(Lexeme::ExitFor),
            "foreach" => Some(Lexeme::ForEach),
            "invalid" => Some(Lexeme::Invalid),
            "library" => Some(Lexeme::Library),
            _ => None,
        },
        8 => match lower {
            "endwhile" => Some(Lexeme::EndWhile),
            "function" => Some(Lexeme::Function),
            _ => None,
        },
        9 => match lower {
            "exitwhile" => Some(Lexeme::ExitWhile),
            _ => None,
        },
        11 => match lower {
            "endfunction" => Some(Lexeme::EndFunction),
            _ => None,
        },
        _ => None,
    }
}

/// Look up a two-word keyword, given as `"first second"` in lower case.
pub fn multi_word_lookup(joined: &str) -> Option<Lexeme> {
    match joined {
        "else if" => Some(Lexeme::ElseIf),
        "end for" => Some(Lexeme::EndFor),
        "end function" => Some(Lexeme::EndFunction),
        "end if" => Some(Lexeme::EndIf),
        "end sub" => Some(Lexeme::EndSub),
        "end while" => Some(Lexeme::EndWhile),
        "exit for" => Some(Lexeme::ExitFor),
        "exit while" => Some(Lexeme::ExitWhile),
        "for each" => Some(Lexeme::ForEach),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
