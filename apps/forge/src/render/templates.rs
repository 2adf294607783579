// Static LaTeX fragments. Nothing here is data-derived; section renderers fill
// the macros defined in the resume preamble.

pub const DOCUMENT_BEGIN: &str = "\\begin{document}";
pub const DOCUMENT_END: &str = "\\end{document}";

/// Resume preamble: packages, ATS-friendly PDF metadata, and the `\resume*` macros.
pub const RESUME_PREAMBLE: &str = r#"\documentclass[letterpaper,10pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\usepackage{setspace}
\usepackage{helvet}
\renewcommand{\familydefault}{\sfdefault}
\usepackage{accsupp}
\usepackage[hidelinks,pdfusetitle]{hyperref}
\hypersetup{
  pdftitle={Resume},
  pdflang={en-US},
  pdfcreator={pdfLaTeX},
  pdfduplex={Simplex},
  pdftoolbar=false,
  pdffitwindow=true,
  pdfnewwindow=true,
  colorlinks=false,
  linktoc=all,
  pdfpagemode=UseNone
}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\usepackage[margin=0.25in]{geometry}

\urlstyle{same}
\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-5pt}\scshape\raggedright\small
}{}{0em}{}[\color{black}\titlerule \vspace{-5pt}]

\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{\small#1} & \small#2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}
"#;

/// Cover letter preamble: charter body font, accent colours, no page numbers.
pub const COVER_LETTER_PREAMBLE: &str = r#"\documentclass[11pt, letterpaper]{article}
\usepackage[utf8]{inputenc}
\usepackage[margin=1in]{geometry}
\usepackage{charter}
\usepackage{xcolor}
\usepackage{hyperref}
\usepackage{setspace}
\usepackage{parskip}
\usepackage{enumitem}

\definecolor{primary}{RGB}{45, 55, 72}
\definecolor{accent}{RGB}{49, 130, 206}

\pagenumbering{gobble}

\hypersetup{
    colorlinks=true,
    urlcolor=accent,
    linkcolor=accent
}

\setlength{\parindent}{0pt}
\setlength{\parskip}{1em}

\setlist[itemize]{leftmargin=*, topsep=2pt, itemsep=2pt, parsep=0pt, partopsep=0pt}
"#;

/// Vertical gap appended after every job in the experience section.
pub const JOB_SPACING: &str = "\\vspace{6pt}";
