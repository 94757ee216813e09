/*!

This is the long-form manual for `quiz_board` and `partyquiz`.

## Leaderboard

The leaderboard sheet has one team per row, with three columns: the name of
the team, its total number of points and the number of people in the team.
By default these are the columns `A`, `B` and `C`, and the first row is a
header.

* Rows where the three cells are empty are skipped.
* Totals and counts that are not numbers are read as `0`.
* Teams are sorted by total (highest first). On equal totals, the team with
  fewer people comes first.
* Two teams are tied only if they have the same total *and* the same number
  of people. Tied teams share a rank, and the next rank skips ahead: two teams
  tied at rank 1 are followed by rank 3.

```bash
partyquiz leaderboard -i scores.xlsx --sheet Results -o leaderboard.html
```

The output is a single HTML file, with the ranking embedded as JSON. It can be
opened without network access.

### Presenting

The page has two modes:

* **all**: all the teams at once, in two columns.
* **reveal**: a single column, initially empty. Each step reveals the next
  group, starting from the last rank and finishing with the winners.

| Keys | Action |
|------|--------|
| `→`, `↓`, space, enter, `n` | reveal the next group |
| `←`, `↑`, backspace, `b`, `p` | hide the last revealed group |
| `r`, escape, home | hide everything |
| `a` | show all the teams |
| `s` | switch to reveal mode |

The same controls are available in the terminal:

```bash
partyquiz present -i scores.csv
```

## Quiz slides

The quiz sheet has three columns: the question, the answer and some notes.
The first row is a header. A topic is a title row followed by six question
rows; topics are usually separated by a blank row. A topic with fewer questions
must be followed by a blank row, otherwise the next title is read as one of its
questions.

Questions start with a label, either a number or the letter `T`, followed by
`.` or `)`:

```text
1. News
1) Who won the election?        | Alice  |
2) What happened on Monday?     | ...    |
...
T) Bonus question               | ...    |
```

Each question becomes one slide. The title of the slide is the label followed
by the topic name (without its own numbering): `1) News`. The body is the
question without its label. Questions without a label use the topic name as
title.

Two topics are put in each deck. A last topic without a partner gets its own
deck.

```bash
partyquiz slides -i quiz.xlsx --sheet questions
```

The decks are written as JSON files next to the spreadsheet, unless an output
directory is given.

## Configuration file

All the options can also be given in a JSON file with `--config`. The flags on
the command line take precedence.

```json
{
  "leaderboard": {
    "title": "Pub quiz, round 3",
    "sheetName": "Results",
    "firstRowIndex": 2,
    "nameColumn": "A",
    "totalColumn": "D",
    "countColumn": "E",
    "palette": ["#ffd700", "#c0c0c0", "#cd7f32"],
    "defaultMode": "reveal"
  },
  "quiz": {
    "sheetName": "questions",
    "questionColumn": "A",
    "answerColumn": "B",
    "notesColumn": "C",
    "deckPrefix": "Party Quiz",
    "outputDirectory": "decks"
  }
}
```
*/
