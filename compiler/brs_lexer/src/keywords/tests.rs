use super::*;

#[test]
fn control_flow_keywords() {
    assert_eq!(lookup("if"), Some(Lexeme::If));
    assert_eq!(lookup("then"), Some(Lexeme::Then));
    assert_eq!(lookup("while"), Some(Lexeme::While));
    assert_eq!(lookup("return"), Some(Lexeme::Return));
    assert_eq!(lookup("next"), Some(Lexeme::Next));
}

#[test]
fn joined_forms_match_spaced_forms() {
    let pairs = [
        ("elseif", "else if"),
        ("endfor", "end for"),
        ("endfunction", "end function"),
        ("endif", "end if"),
        ("endsub", "end sub"),
        ("endwhile", "end while"),
        ("exitfor", "exit for"),
        ("exitwhile", "exit while"),
        ("foreach", "for each"),
    ];
    for (joined, spaced) in pairs {
        assert_eq!(lookup(joined), multi_word_lookup(spaced), "{joined}");
        assert!(lookup(joined).is_some());
    }
}

#[test]
fn non_keywords() {
    assert_eq!(lookup("x"), None);
    assert_eq!(lookup("each"), None);
    assert_eq!(lookup("type"), None);
    assert_eq!(lookup("createobject"), None);
    assert_eq!(multi_word_lookup("end foo"), None);
    assert_eq!(multi_word_lookup("end  if"), None);
}

#[test]
fn multi_word_starters() {
    for word in ["end", "else", "exit", "for"] {
        assert!(starts_multi_word(word));
    }
    assert!(!starts_multi_word("if"));
}
